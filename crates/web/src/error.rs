//! Error types for the portfolio client.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised while wiring the page at startup.
///
/// Any of these means the page and the client disagree about the DOM
/// contract, so startup stops instead of running half-wired.
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// No element matched the selector.
    #[error("element not found: {0}")]
    MissingElement(String),

    /// An element matched but has the wrong interface.
    #[error("element {selector} is not a {expected}")]
    WrongElementType {
        selector: String,
        expected: &'static str,
    },

    /// The typing animation has nothing to cycle over.
    #[error("phrase list is empty")]
    NoPhrases,

    /// `window.PORTFOLIO_CONFIG` could not be decoded.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// `window.PORTFOLIO_CONFIG` decoded but holds an unusable value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),

    /// A browser API call returned an exception.
    #[error("browser error: {0}")]
    Js(String),
}

impl From<PortfolioError> for JsValue {
    fn from(err: PortfolioError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Outcome of a failed upload or contact flow.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Selected file is missing or not a PDF. No request was sent.
    #[error("expected application/pdf, got {}", media_type.as_deref().unwrap_or("no file"))]
    InvalidFile { media_type: Option<String> },

    /// Server answered with a non-2xx status.
    #[error("server rejected request ({status})")]
    Rejected { status: u16 },

    /// The request never completed.
    #[error("request failed: {0}")]
    Transport(String),

    /// Request body could not be encoded.
    #[error("JSON error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Building the request or reading the form failed.
    #[error("browser error: {0}")]
    Dom(String),
}

impl FlowError {
    /// Transport failures carry an underlying error worth logging.
    pub fn is_transport(&self) -> bool {
        matches!(self, FlowError::Transport(_))
    }
}

/// Result type for startup wiring.
pub type Result<T> = std::result::Result<T, PortfolioError>;

pub(crate) fn js_err(err: impl std::fmt::Debug) -> String {
    format!("{err:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_file_message() {
        let err = FlowError::InvalidFile {
            media_type: Some("image/png".to_string()),
        };
        assert_eq!(err.to_string(), "expected application/pdf, got image/png");

        let err = FlowError::InvalidFile { media_type: None };
        assert_eq!(err.to_string(), "expected application/pdf, got no file");
    }

    #[test]
    fn test_is_transport() {
        assert!(FlowError::Transport("offline".into()).is_transport());
        assert!(!FlowError::Rejected { status: 500 }.is_transport());
        assert!(!FlowError::InvalidFile { media_type: None }.is_transport());
    }

    #[test]
    fn test_missing_element_message() {
        let err = PortfolioError::MissingElement(".typing-animation".into());
        assert_eq!(err.to_string(), "element not found: .typing-animation");
    }
}
