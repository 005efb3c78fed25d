pub mod languages;
mod sandbox;
mod simple_executor;

pub use simple_executor::SimpleExecutor;

use crate::config::ScriptLimits;
use crate::errors::ExecutionError;
use crate::types::Language;

use languages::{
    CppPolicy,
    CssPolicy,
    HtmlPolicy,
    JavascriptPolicy,
    PythonPolicy,
};

/// Per-language contract: inspect the source and either produce output text
/// or fail with a descriptive error.
pub trait LanguagePolicy: Send + Sync {
    fn language(&self) -> Language;
    fn evaluate(&self, code: &str) -> Result<String, ExecutionError>;
}

pub fn policy_for(language: Language, limits: ScriptLimits) -> Box<dyn LanguagePolicy> {
    match language {
        Language::Javascript => Box::new(JavascriptPolicy::new(limits)),
        Language::Python => Box::new(PythonPolicy::new(limits)),
        Language::Cpp => Box::new(CppPolicy),
        Language::Html => Box::new(HtmlPolicy),
        Language::Css => Box::new(CssPolicy),
    }
}
