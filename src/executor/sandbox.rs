use boa_engine::{
    Context,
    JsError,
    JsValue,
};
use std::thread;

use crate::config::ScriptLimits;
use crate::errors::ExecutionError;

// boa's parser recurses once per nesting level. The source caps below keep the
// worst case well inside this.
const SANDBOX_STACK_SIZE: usize = 256 * 1024 * 1024;

/// Rejects sources the parser cannot safely take: too long, or brackets
/// nested deeper than the configured depth.
pub(crate) fn validate_source(code: &str, limits: &ScriptLimits) -> Result<(), ExecutionError> {
    if code.len() > limits.max_code_length {
        return Err(ExecutionError::CodeTooLarge {
            max: limits.max_code_length,
            actual: code.len(),
        });
    }

    let mut depth = 0usize;
    for c in code.chars() {
        match c {
            '(' | '[' | '{' => {
                depth += 1;
                if depth > limits.max_nesting_depth {
                    return Err(ExecutionError::NestingTooDeep(limits.max_nesting_depth));
                }
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

/// Validates `code`, then hands it to `body` together with a fresh limited
/// context on a dedicated thread. Nothing survives the call.
pub(crate) fn run<T, F>(code: &str, limits: ScriptLimits, body: F) -> Result<T, ExecutionError>
where
    F: FnOnce(&mut Context, &str) -> Result<T, ExecutionError> + Send + 'static,
    T: Send + 'static,
{
    validate_source(code, &limits)?;

    let source = code.to_string();
    let handle = thread::Builder::new()
        .name("script-sandbox".to_string())
        .stack_size(SANDBOX_STACK_SIZE)
        .spawn(move || {
            let mut context = Context::default();
            let runtime_limits = context.runtime_limits_mut();
            runtime_limits.set_loop_iteration_limit(limits.loop_iterations);
            runtime_limits.set_recursion_limit(limits.recursion);
            body(&mut context, &source)
        })
        .map_err(|e| ExecutionError::Sandbox(e.to_string()))?;

    handle
        .join()
        .map_err(|_| ExecutionError::Sandbox("script thread panicked".to_string()))?
}

pub(crate) fn describe(err: JsError, context: &mut Context) -> ExecutionError {
    match err.try_native(context) {
        Ok(native) => ExecutionError::Script {
            name: native.kind.to_string(),
            message: native.message().to_string(),
        },
        Err(_) => {
            // `throw "text"` and other non-error values
            let message = err
                .as_opaque()
                .and_then(|value| value.to_string(context).ok())
                .map(|text| text.to_std_string_escaped())
                .unwrap_or_else(|| err.to_string());
            ExecutionError::Script {
                name: "Uncaught".to_string(),
                message,
            }
        }
    }
}

pub(crate) fn stringify(value: &JsValue, context: &mut Context) -> String {
    match value.to_string(context) {
        Ok(text) => text.to_std_string_escaped(),
        Err(_) => value.display().to_string(),
    }
}
