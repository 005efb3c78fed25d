use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fmt,
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Python,
    Cpp,
    Html,
    Css,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Javascript,
        Language::Python,
        Language::Cpp,
        Language::Html,
        Language::Css,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Javascript => "javascript",
            Language::Python => "python",
            Language::Cpp => "cpp",
            Language::Html => "html",
            Language::Css => "css",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::Javascript => "JavaScript",
            Language::Python => "Python",
            Language::Cpp => "C++",
            Language::Html => "HTML",
            Language::Css => "CSS",
        }
    }

    /// Prefix for folded execution errors. Markup languages report their
    /// validation message as-is.
    pub fn error_label(&self) -> Option<&'static str> {
        match self {
            Language::Javascript | Language::Python | Language::Cpp => Some(self.label()),
            Language::Html | Language::Css => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExecutionRequest {
    pub code: String,
    pub language: String,
    #[serde(rename = "sessionId", default)]
    pub session_id: Option<String>,
}

/// Response envelope. `output` carries the error text when the run failed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub output: String,
    pub error: bool,
    pub success: bool,
}

impl ExecutionResult {
    pub fn from_outcome(outcome: &ExecutionOutcome) -> Self {
        match &outcome.error {
            Some(error) => ExecutionResult {
                output: error.clone(),
                error: true,
                success: false,
            },
            None => ExecutionResult {
                output: outcome.output.clone(),
                error: false,
                success: true,
            },
        }
    }

    pub fn system_error(message: impl fmt::Display) -> Self {
        ExecutionResult {
            output: format!("System Error: {}", message),
            error: true,
            success: false,
        }
    }
}

/// What a policy run produced before it is shaped into an envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionOutcome {
    pub output: String,
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExecutionRecord {
    pub session_id: Option<String>,
    pub language: String,
    pub code: String,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl ExecutionRecord {
    pub fn new(request: &ExecutionRequest, outcome: &ExecutionOutcome) -> Self {
        ExecutionRecord {
            session_id: request.session_id.clone(),
            language: request.language.clone(),
            code: request.code.clone(),
            output: Some(outcome.output.clone()).filter(|output| !output.is_empty()),
            error: outcome.error.clone().filter(|error| !error.is_empty()),
        }
    }
}
