//! Structured error types for windowgrid.
//!
//! Layout itself never fails: missing measurements size to zero and absent
//! regions are skipped. Errors come from configuration and input loading.

/// All errors that can occur while configuring or loading a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid grid options or column specs (missing id, duplicate id, missing width).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A CSS font shorthand that could not be understood.
    #[error("Invalid font: {0}")]
    Font(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for host-provided string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
