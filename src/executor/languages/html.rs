use regex::Regex;
use std::sync::OnceLock;

use crate::errors::ExecutionError;
use crate::executor::LanguagePolicy;
use crate::types::Language;

const RENDERED: &str = "HTML rendered successfully! Check the preview tab.";

// (tag, opening pattern, closing pattern)
fn paired_tags() -> &'static [(&'static str, Regex, Regex)] {
    static TAGS: OnceLock<Vec<(&'static str, Regex, Regex)>> = OnceLock::new();
    TAGS.get_or_init(|| {
        ["script", "style"]
            .into_iter()
            .map(|tag| {
                let open = Regex::new(&format!(r"(?i)<{}(\s[^>]*)?>", tag)).expect("static regex");
                let close = Regex::new(&format!(r"(?i)</{}\s*>", tag)).expect("static regex");
                (tag, open, close)
            })
            .collect()
    })
}

/// Structural check only; rendering happens in the editor's preview frame.
#[derive(Debug, Clone, Default)]
pub struct HtmlPolicy;

impl LanguagePolicy for HtmlPolicy {
    fn language(&self) -> Language {
        Language::Html
    }

    fn evaluate(&self, code: &str) -> Result<String, ExecutionError> {
        for (tag, open, close) in paired_tags() {
            let mut cursor = 0;
            while let Some(opening) = open.find_at(code, cursor) {
                match close.find_at(code, opening.end()) {
                    Some(closing) => cursor = closing.end(),
                    None => return Err(ExecutionError::UnclosedTag(tag)),
                }
            }
        }
        Ok(RENDERED.to_string())
    }
}
