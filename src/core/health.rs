//! Backend liveness as the chat state sees it.

/// Outcome of one health probe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HealthReport {
    pub online: bool,
    /// Model name advertised by the backend, if any
    pub model: Option<String>,
}

impl HealthReport {
    pub fn offline() -> Self {
        Self::default()
    }
}
