use log::{
    debug,
    info,
};

use crate::config::ScriptLimits;
use crate::errors::ExecutionError;
use crate::executor::policy_for;
use crate::types::{
    ExecutionOutcome,
    ExecutionRequest,
    Language,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleExecutor {
    limits: ScriptLimits,
}

impl SimpleExecutor {
    pub fn new(limits: ScriptLimits) -> Self {
        SimpleExecutor { limits }
    }

    pub fn execute(&self, request: &ExecutionRequest) -> ExecutionOutcome {
        let language = match request.language.parse::<Language>() {
            Ok(language) => language,
            Err(unknown) => {
                info!("Rejecting unsupported language {:?}", unknown);
                return ExecutionOutcome {
                    output: String::new(),
                    error: Some(ExecutionError::UnsupportedLanguage(unknown).to_string()),
                };
            }
        };

        let policy = policy_for(language, self.limits);
        match policy.evaluate(&request.code) {
            Ok(output) => ExecutionOutcome {
                output,
                error: None,
            },
            Err(e) => {
                debug!("{} policy rejected code: {}", language, e);
                let error = match language.error_label() {
                    Some(label) => format!("{} Error: {}", label, e),
                    None => e.to_string(),
                };
                ExecutionOutcome {
                    output: String::new(),
                    error: Some(error),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(language: &str, code: &str) -> ExecutionRequest {
        ExecutionRequest {
            language: language.to_string(),
            code: code.to_string(),
            session_id: Some("session".to_string()),
        }
    }

    #[test]
    fn test_execute_javascript() {
        let outcome = SimpleExecutor::default().execute(&request("javascript", "console.log(\"hi\")"));
        assert_eq!(outcome.output, "hi");
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn test_javascript_error_is_prefixed_and_output_empty() {
        let outcome = SimpleExecutor::default().execute(&request("javascript", "undefinedFn()"));
        assert_eq!(outcome.output, "");
        let error = outcome.error.unwrap();
        assert!(error.starts_with("JavaScript Error: ReferenceError: "), "{error}");
    }

    #[test]
    fn test_execute_python_unclosed_print() {
        let outcome = SimpleExecutor::default().execute(&request("python", "print(\"x\""));
        assert_eq!(
            outcome.error.as_deref(),
            Some("Python Error: SyntaxError: Unclosed print statement at line 1")
        );
    }

    #[test]
    fn test_execute_cpp() {
        let outcome = SimpleExecutor::default()
            .execute(&request("cpp", "#include <iostream>\nint main(){cout<<\"Hi\";}"));
        assert_eq!(outcome.output, "Hi");

        let outcome = SimpleExecutor::default().execute(&request("cpp", "int main(){"));
        let error = outcome.error.unwrap();
        assert!(error.starts_with("C++ Error: Compilation Error: Mismatched braces"));
    }

    #[test]
    fn test_markup_errors_are_bare() {
        let outcome = SimpleExecutor::default().execute(&request("css", "body{color:red;"));
        assert_eq!(
            outcome.error.as_deref(),
            Some("CSS Syntax Error: Mismatched braces - missing closing brace(s)")
        );

        let outcome = SimpleExecutor::default().execute(&request("html", "<script>"));
        assert_eq!(outcome.error.as_deref(), Some("HTML Error: Unclosed <script> tag detected"));
    }

    #[test]
    fn test_execute_unsupported_language() {
        let outcome = SimpleExecutor::default().execute(&request("ruby", "puts 1"));
        assert_eq!(outcome.output, "");
        assert_eq!(outcome.error.as_deref(), Some("Language ruby is not supported yet"));
    }
}
