use actix_web::{
    http::StatusCode,
    HttpResponse,
    ResponseError,
};
use thiserror::Error;

use crate::types::ExecutionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingBrace {
    Opening,
    Closing,
}

impl std::fmt::Display for MissingBrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingBrace::Opening => f.write_str("opening"),
            MissingBrace::Closing => f.write_str("closing"),
        }
    }
}

/// Expected failures raised by a language policy. These never leave the
/// request handler; they are folded into the response envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("Language {0} is not supported yet")]
    UnsupportedLanguage(String),
    #[error("{name}: {message}")]
    Script { name: String, message: String },
    #[error("SyntaxError: {message} at line {line}")]
    Syntax { message: String, line: usize },
    #[error("Compilation Error: {0}")]
    Compilation(String),
    #[error("HTML Error: Unclosed <{0}> tag detected")]
    UnclosedTag(&'static str),
    #[error("CSS Syntax Error: Mismatched braces - missing {0} brace(s)")]
    CssBraces(MissingBrace),
    #[error("RangeError: source is {actual} bytes, the limit is {max}")]
    CodeTooLarge { max: usize, actual: usize },
    #[error("RangeError: brackets nested deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("InternalError: {0}")]
    Sandbox(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store rejected record with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("failed to build store client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failures outside the per-language contract. Rendered as a 500 envelope.
#[derive(Error, Debug)]
pub enum SystemError {
    #[error("{0}")]
    MalformedRequest(#[from] serde_json::Error),
    #[error("{0}")]
    Persistence(#[from] StoreError),
    #[error("execution task failed: {0}")]
    Blocking(String),
}

impl ResponseError for SystemError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ExecutionResult::system_error(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_error_messages() {
        assert_eq!(
            ExecutionError::UnsupportedLanguage("ruby".to_string()).to_string(),
            "Language ruby is not supported yet"
        );
        assert_eq!(
            ExecutionError::UnclosedTag("script").to_string(),
            "HTML Error: Unclosed <script> tag detected"
        );
        assert_eq!(
            ExecutionError::CssBraces(MissingBrace::Closing).to_string(),
            "CSS Syntax Error: Mismatched braces - missing closing brace(s)"
        );
        assert_eq!(
            ExecutionError::Syntax {
                message: "Unclosed print statement".to_string(),
                line: 3,
            }
            .to_string(),
            "SyntaxError: Unclosed print statement at line 3"
        );
        assert_eq!(
            ExecutionError::CodeTooLarge { max: 10, actual: 12 }.to_string(),
            "RangeError: source is 12 bytes, the limit is 10"
        );
    }

    #[test]
    fn test_system_error_renders_500_envelope() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = SystemError::from(parse_error);
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
