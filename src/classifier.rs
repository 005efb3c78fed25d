//! Maps result text to the visual treatment used by the editor's output pane.
//!
//! Purely presentational: nothing here changes what was executed or stored.

const ERROR_TOKENS: [&str; 6] = [
    "error",
    "exception",
    "syntaxerror",
    "referenceerror",
    "typeerror",
    "uncaught",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTone {
    Idle,
    Running,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEmphasis {
    Plain,
    Error,
    StackFrame,
}

pub fn is_error_output(output: &str) -> bool {
    let lowered = output.to_lowercase();
    ERROR_TOKENS.iter().any(|token| lowered.contains(token))
}

pub fn classify(output: &str, running: bool) -> OutputTone {
    if running {
        OutputTone::Running
    } else if is_error_output(output) {
        OutputTone::Error
    } else if output.is_empty() {
        OutputTone::Idle
    } else {
        OutputTone::Success
    }
}

pub fn line_emphasis(line: &str) -> LineEmphasis {
    let lowered = line.to_lowercase();
    if lowered.contains("error") || lowered.contains("exception") {
        LineEmphasis::Error
    } else if line.trim_start().starts_with("at ") {
        LineEmphasis::StackFrame
    } else {
        LineEmphasis::Plain
    }
}

pub fn emphasize(output: &str) -> Vec<(LineEmphasis, &str)> {
    output.lines().map(|line| (line_emphasis(line), line)).collect()
}
