use serde_json::Value;

/// JSON schema the provider's reply must satisfy, with the name it is
/// registered under.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSchema {
    name: &'static str,
    schema: Value,
}

impl ResponseSchema {
    pub fn new(name: &'static str, schema: Value) -> Self {
        Self { name, schema }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }
}

/// A logical structured-completion request. Knows nothing about transport.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    system: String,
    user: String,
    response_schema: ResponseSchema,
    temperature: f32,
}

impl CompletionRequest {
    pub fn new(
        system: impl Into<String>,
        user: impl Into<String>,
        response_schema: ResponseSchema,
        temperature: f32,
    ) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            response_schema,
            temperature,
        }
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn response_schema(&self) -> &ResponseSchema {
        &self.response_schema
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// What the provider sent back on a nominally successful call.
///
/// A present `refusal` wins over any `content`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    content: Option<String>,
    refusal: Option<String>,
}

impl Completion {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            refusal: None,
        }
    }

    pub fn refusal(reason: impl Into<String>) -> Self {
        Self {
            content: None,
            refusal: Some(reason.into()),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn from_parts(content: Option<String>, refusal: Option<String>) -> Self {
        Self { content, refusal }
    }

    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn refusal_reason(&self) -> Option<&str> {
        self.refusal.as_deref()
    }

    pub fn is_refusal(&self) -> bool {
        self.refusal.is_some()
    }
}
