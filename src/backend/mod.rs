pub mod client;
pub mod health;
pub mod types;

pub use client::{Backend, BackendError, HttpBackend, probe};
pub use health::HealthSubscription;
pub use crate::core::health::HealthReport;
pub use types::{GenerateRequest, GenerateResponse, HealthResponse};
