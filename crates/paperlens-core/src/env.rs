use serde::{Deserialize, Serialize};

/// Deployment environment, read from `NODE_ENV`.
///
/// Anything other than `production` or `test` is treated as development so
/// a bare local checkout gets verbose errors and the local browser path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeEnv {
    #[default]
    Development,
    Production,
    Test,
}

impl RuntimeEnv {
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("production") => RuntimeEnv::Production,
            Some("test") => RuntimeEnv::Test,
            _ => RuntimeEnv::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == RuntimeEnv::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeEnv::Development => "development",
            RuntimeEnv::Production => "production",
            RuntimeEnv::Test => "test",
        }
    }
}
