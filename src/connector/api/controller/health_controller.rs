use serde::Serialize;

use super::super::Container;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub model: String,
}

pub struct HealthController<'a> {
    container: &'a Container,
}

impl<'a> HealthController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "ok",
            model: self.container.model_name().to_string(),
        }
    }
}
