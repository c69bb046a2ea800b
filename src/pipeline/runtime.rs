//! Runtime signals
//!
//! Built once from configuration and passed explicitly to the execution
//! policy, so nothing below the boundary reads the environment.

use serde::{Deserialize, Serialize};

/// Whether live extraction may be attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Developer machine with a usable browser
    Local,
    /// Hosted deployment, synthetic data only
    Production,
}

impl ExecutionMode {
    /// Interpret an environment name such as `development` or `production`
    #[must_use]
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => ExecutionMode::Local,
            _ => ExecutionMode::Production,
        }
    }

    /// Label echoed in the response `environment` field
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ExecutionMode::Local => "local",
            ExecutionMode::Production => "production",
        }
    }
}

/// Signals the policy branches on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeContext {
    pub mode: ExecutionMode,
    /// Hosting platform, when one was detected
    pub platform: Option<String>,
}

impl RuntimeContext {
    #[must_use]
    pub fn local() -> Self {
        Self {
            mode: ExecutionMode::Local,
            platform: None,
        }
    }

    #[must_use]
    pub fn production() -> Self {
        Self {
            mode: ExecutionMode::Production,
            platform: None,
        }
    }

    #[must_use]
    pub fn environment_label(&self) -> &'static str {
        self.mode.label()
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        self.mode == ExecutionMode::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_values() {
        assert_eq!(ExecutionMode::from_env_value(" Development "), ExecutionMode::Local);
        assert_eq!(ExecutionMode::from_env_value("production"), ExecutionMode::Production);
        assert_eq!(ExecutionMode::from_env_value(""), ExecutionMode::Production);
    }

    #[test]
    fn labels() {
        assert_eq!(RuntimeContext::local().environment_label(), "local");
        assert_eq!(RuntimeContext::production().environment_label(), "production");
    }
}
