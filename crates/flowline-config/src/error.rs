use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to parse flow definition: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("failed to read flow definition from {path}: {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },
}
