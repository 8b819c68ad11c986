use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerdantError {
    #[error("Unknown plant spec: {0}")]
    UnknownSpec(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Catalog error: {0}")]
    CatalogError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, VerdantError>;
