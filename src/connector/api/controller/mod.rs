pub mod health_controller;
pub mod predict_controller;

pub use health_controller::{HealthController, HealthStatus};
pub use predict_controller::PredictController;
