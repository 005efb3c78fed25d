use boa_engine::Source;
use regex::Regex;
use std::sync::OnceLock;

use crate::config::ScriptLimits;
use crate::errors::ExecutionError;
use crate::executor::sandbox::{
    self,
    describe,
    stringify,
};
use crate::executor::LanguagePolicy;
use crate::types::Language;

const LIMITED: &str = "Python code processed (limited execution in browser environment)";

fn print_call() -> &'static Regex {
    static PRINT: OnceLock<Regex> = OnceLock::new();
    PRINT.get_or_init(|| Regex::new(r"print\((.+)\)").expect("static regex"))
}

/// Line-oriented simulation: only `print(...)` produces output.
#[derive(Debug, Clone, Default)]
pub struct PythonPolicy {
    limits: ScriptLimits,
}

impl PythonPolicy {
    pub fn new(limits: ScriptLimits) -> Self {
        PythonPolicy { limits }
    }

    /// Quotes are stripped. Text with an arithmetic operator is evaluated as a
    /// script expression; anything that fails to evaluate is printed as is.
    fn render_print_argument(&self, argument: &str) -> String {
        let text: String = argument.chars().filter(|c| *c != '\'' && *c != '"').collect();
        if !text.contains(&['+', '-', '*', '/'][..]) {
            return text;
        }

        let evaluated = sandbox::run(&text, self.limits, |context, expression| {
            let value = context
                .eval(Source::from_bytes(expression))
                .map_err(|err| describe(err, context))?;
            Ok(stringify(&value, context))
        });
        evaluated.unwrap_or(text)
    }
}

impl LanguagePolicy for PythonPolicy {
    fn language(&self) -> Language {
        Language::Python
    }

    fn evaluate(&self, code: &str) -> Result<String, ExecutionError> {
        let mut outputs = Vec::new();

        for (index, raw) in code.lines().enumerate() {
            let line = raw.trim();
            let line_number = index + 1;

            if line.starts_with("print(") {
                if !line.contains(')') {
                    return Err(ExecutionError::Syntax {
                        message: "Unclosed print statement".to_string(),
                        line: line_number,
                    });
                }
                if let Some(captures) = print_call().captures(line) {
                    outputs.push(self.render_print_argument(&captures[1]));
                }
                continue;
            }

            if line.is_empty() || line.starts_with('#') || line.starts_with("def ") {
                continue;
            }

            if line.starts_with("if ") && !line.ends_with(':') {
                return Err(ExecutionError::Syntax {
                    message: "Invalid syntax - missing colon after if statement".to_string(),
                    line: line_number,
                });
            }
        }

        if outputs.is_empty() {
            Ok(LIMITED.to_string())
        } else {
            Ok(outputs.join("\n"))
        }
    }
}
