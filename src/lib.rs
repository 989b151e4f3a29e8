pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{PredictRisksUseCase, RiskProvider};

pub use connector::{
    build_router, serve, Container, ContainerConfig, MockRiskProvider, OpenAiConfig,
    OpenAiRiskProvider,
};

pub use domain::{
    Completion, CompletionRequest, PredictionError, PredictionErrorKind, Profile, ProviderError,
    Risk, RiskAssessment, MAX_PROFILE_CHARS, RISK_COUNT,
};
