use thiserror::Error;

#[derive(Debug, Error)]
pub enum TabError {
    #[error("tab group has no tabs")]
    Empty,
    #[error("selected tab {index} out of range for {len} tabs")]
    OutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("chart {container} refers to unknown panel {panel}")]
    UnknownPanel { container: String, panel: String },
}
