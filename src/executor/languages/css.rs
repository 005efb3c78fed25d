use std::cmp::Ordering;

use super::brace_counts;
use crate::errors::{
    ExecutionError,
    MissingBrace,
};
use crate::executor::LanguagePolicy;
use crate::types::Language;

const APPLIED: &str = "CSS styles applied successfully! Check the preview tab.";

#[derive(Debug, Clone, Default)]
pub struct CssPolicy;

impl LanguagePolicy for CssPolicy {
    fn language(&self) -> Language {
        Language::Css
    }

    fn evaluate(&self, code: &str) -> Result<String, ExecutionError> {
        let (open, close) = brace_counts(code);
        match open.cmp(&close) {
            Ordering::Greater => Err(ExecutionError::CssBraces(MissingBrace::Closing)),
            Ordering::Less => Err(ExecutionError::CssBraces(MissingBrace::Opening)),
            Ordering::Equal => Ok(APPLIED.to_string()),
        }
    }
}
