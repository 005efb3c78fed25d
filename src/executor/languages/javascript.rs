use boa_engine::{
    object::builtins::JsArray,
    Context,
    JsObject,
    Source,
};
use log::debug;

use crate::config::ScriptLimits;
use crate::errors::ExecutionError;
use crate::executor::sandbox::{
    self,
    describe,
    stringify,
};
use crate::executor::LanguagePolicy;
use crate::types::Language;

const NO_OUTPUT: &str = "Code executed successfully (no output)";

// Installed into every fresh context before the user script. It evaluates to
// the `[lines, errors]` buffers, which are only reachable through the console
// closures and the handles kept on the Rust side. `String` is captured up front
// and nothing goes through prototypes the user could replace.
const CONSOLE_SINK: &str = r#"
(function (global) {
    var lines = [];
    var errors = [];
    var toText = String;
    function render(args) {
        var text = '';
        for (var i = 0; i < args.length; i++) {
            text += (i > 0 ? ' ' : '') + toText(args[i]);
        }
        return text;
    }
    global.console = {
        log: function () { lines[lines.length] = render(arguments); },
        info: function () { lines[lines.length] = 'INFO: ' + render(arguments); },
        warn: function () { lines[lines.length] = 'WARNING: ' + render(arguments); },
        error: function () { errors[errors.length] = 'ERROR: ' + render(arguments); }
    };
    return [lines, errors];
})(globalThis);
"#;

/// Runs scripts in an embedded engine. Each call gets its own context with
/// no host bindings and bounded loops/recursion.
#[derive(Debug, Clone, Default)]
pub struct JavascriptPolicy {
    limits: ScriptLimits,
}

impl JavascriptPolicy {
    pub fn new(limits: ScriptLimits) -> Self {
        JavascriptPolicy { limits }
    }
}

struct ConsoleBuffers {
    lines: JsArray,
    errors: JsArray,
}

impl ConsoleBuffers {
    fn install(context: &mut Context) -> Result<Self, ExecutionError> {
        let handle = context
            .eval(Source::from_bytes(CONSOLE_SINK))
            .map_err(|err| describe(err, context))?;
        let handle = as_array(handle.as_object().cloned(), context)?;

        let lines = handle.get(0u32, context).map_err(|err| describe(err, context))?;
        let errors = handle.get(1u32, context).map_err(|err| describe(err, context))?;
        Ok(ConsoleBuffers {
            lines: as_array(lines.as_object().cloned(), context)?,
            errors: as_array(errors.as_object().cloned(), context)?,
        })
    }

    /// Log lines first, then error lines, each in call order.
    fn drain(&self, context: &mut Context) -> Result<Vec<String>, ExecutionError> {
        let mut captured = read_buffer(&self.lines, context)?;
        captured.extend(read_buffer(&self.errors, context)?);
        Ok(captured)
    }
}

fn as_array(
    object: Option<JsObject>,
    context: &mut Context,
) -> Result<JsArray, ExecutionError> {
    let object = object.ok_or_else(|| ExecutionError::Sandbox("console buffer missing".to_string()))?;
    JsArray::from_object(object).map_err(|err| describe(err, context))
}

fn read_buffer(buffer: &JsArray, context: &mut Context) -> Result<Vec<String>, ExecutionError> {
    let length = buffer.length(context).map_err(|err| describe(err, context))?;
    let mut lines = Vec::new();
    for index in 0..length {
        let value = buffer.get(index, context).map_err(|err| describe(err, context))?;
        lines.push(stringify(&value, context));
    }
    Ok(lines)
}

impl LanguagePolicy for JavascriptPolicy {
    fn language(&self) -> Language {
        Language::Javascript
    }

    fn evaluate(&self, code: &str) -> Result<String, ExecutionError> {
        sandbox::run(code, self.limits, |context, source| {
            let console = ConsoleBuffers::install(context)?;

            let completion = context
                .eval(Source::from_bytes(source))
                .map_err(|err| describe(err, context))?;

            let captured = console.drain(context)?;
            debug!("Captured {} console line(s)", captured.len());

            if !captured.is_empty() {
                Ok(captured.join("\n"))
            } else if !completion.is_undefined() {
                Ok(stringify(&completion, context))
            } else {
                Ok(NO_OUTPUT.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> JavascriptPolicy {
        JavascriptPolicy::new(ScriptLimits::default())
    }

    fn error_name(err: ExecutionError) -> String {
        match err {
            ExecutionError::Script { name, .. } => name,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_console_log() {
        assert_eq!(policy().evaluate("console.log(\"hi\")").unwrap(), "hi");
    }

    #[test]
    fn test_console_levels_and_order() {
        let code = r#"
            console.error("bad", 1);
            console.log("a", 2, true);
            console.info("note");
            console.warn("careful");
        "#;
        assert_eq!(
            policy().evaluate(code).unwrap(),
            "a 2 true\nINFO: note\nWARNING: careful\nERROR: bad 1"
        );
    }

    #[test]
    fn test_completion_value_without_logs() {
        assert_eq!(policy().evaluate("1 + 2").unwrap(), "3");
        assert_eq!(policy().evaluate("'abc'.toUpperCase()").unwrap(), "ABC");
        assert_eq!(policy().evaluate("var x = 1;").unwrap(), NO_OUTPUT);
    }

    #[test]
    fn test_thrown_errors_keep_their_name() {
        let err = policy().evaluate("throw new TypeError('bad input')").unwrap_err();
        assert_eq!(
            err,
            ExecutionError::Script {
                name: "TypeError".to_string(),
                message: "bad input".to_string(),
            }
        );
        assert_eq!(error_name(policy().evaluate("missing + 1").unwrap_err()), "ReferenceError");
        assert_eq!(error_name(policy().evaluate("console.log(\"hi\"").unwrap_err()), "SyntaxError");
    }

    #[test]
    fn test_thrown_string() {
        let err = policy().evaluate("throw 'plain'").unwrap_err();
        assert_eq!(
            err,
            ExecutionError::Script {
                name: "Uncaught".to_string(),
                message: "plain".to_string(),
            }
        );
    }

    #[test]
    fn test_failed_call_does_not_leak_into_next() {
        let policy = policy();
        assert!(policy.evaluate("console.log('first'); var leaked = 1; null.x").is_err());
        assert_eq!(policy.evaluate("console.log('second')").unwrap(), "second");
        assert_eq!(policy.evaluate("typeof leaked").unwrap(), "undefined");
    }

    #[test]
    fn test_no_host_bindings() {
        assert_eq!(policy().evaluate("typeof require").unwrap(), "undefined");
        assert_eq!(policy().evaluate("typeof process").unwrap(), "undefined");
    }

    #[test]
    fn test_runaway_loop_is_stopped() {
        let policy = JavascriptPolicy::new(ScriptLimits {
            loop_iterations: 1_000,
            recursion: 64,
            ..ScriptLimits::default()
        });
        assert!(policy.evaluate("while (true) {}").is_err());
        assert!(policy.evaluate("function f() { return f(); } f()").is_err());
        assert_eq!(policy.evaluate("for (let i = 0; i < 10; i++) {} 'done'").unwrap(), "done");
    }

    #[test]
    fn test_default_limits_allow_ordinary_programs() {
        let depth = "function depth(n) { return n === 0 ? 0 : 1 + depth(n - 1); } depth(300)";
        assert_eq!(policy().evaluate(depth).unwrap(), "300");

        let long_loop = "let total = 0; for (let i = 0; i < 2000000; i++) { total += 1; } total";
        assert_eq!(policy().evaluate(long_loop).unwrap(), "2000000");
    }

    #[test]
    fn test_deeply_nested_source_is_rejected_before_parsing() {
        let err = policy().evaluate(&"[".repeat(100_000)).unwrap_err();
        assert!(matches!(err, ExecutionError::CodeTooLarge { .. }));

        let err = policy().evaluate(&"[".repeat(1_000)).unwrap_err();
        assert_eq!(err, ExecutionError::NestingTooDeep(ScriptLimits::default().max_nesting_depth));
        assert!(err.to_string().starts_with("RangeError: "));
    }

    #[test]
    fn test_console_survives_replaced_globals() {
        let code = r#"
            console.log("kept", 1);
            console.error("still here");
            JSON.stringify = null;
            Array.prototype.concat = null;
            Array.prototype.push = null;
            Array.prototype.map = null;
            String = null;
            __editorConsole = null;
            console.log("after", 2);
        "#;
        assert_eq!(
            policy().evaluate(code).unwrap(),
            "kept 1\nafter 2\nERROR: still here"
        );
    }

    #[test]
    fn test_starter_program() {
        let code = crate::snippets::starter_code(Language::Javascript);
        let output = policy().evaluate(code).unwrap();
        assert!(output.starts_with("Hello, World!\nFibonacci sequence:\nF(0) = 0"));
        assert!(output.ends_with("F(7) = 13"));
    }
}
