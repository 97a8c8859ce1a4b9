use std::path::PathBuf;

pub mod card;
pub mod catalog;
pub mod config;
pub mod grid;
pub mod image;
pub mod media;
pub mod pricing;
pub mod product;
pub mod translation;
pub mod warning;

#[cfg(test)]
mod tests;

#[derive(Debug, thiserror::Error)]
#[error("{context}: {detail}")]
pub struct Error {
    pub context: Box<ErrorContext>,
    pub detail: Box<ErrorDetail>,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub path: PathBuf,
}

impl ErrorContext {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn error(&self, detail: ErrorDetail) -> Error {
        Error {
            context: Box::new(self.clone()),
            detail: Box::new(detail),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorDetail {
    #[error("Failed to read document: {0}")]
    ReadDocument(std::io::Error),
    #[error("Failed to parse YAML document: {0}")]
    ParseYaml(serde_yaml::Error),
    #[error("Failed to parse JSON document: {0}")]
    ParseJson(serde_json::Error),
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: serde_json::Value,
    },
    #[error("Invalid product: {0}")]
    InvalidProduct(serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(config::ValidationError),
}
