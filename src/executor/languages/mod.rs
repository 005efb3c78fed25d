mod cpp;
mod css;
mod html;
mod javascript;
mod python;

pub use cpp::CppPolicy;
pub use css::CssPolicy;
pub use html::HtmlPolicy;
pub use javascript::JavascriptPolicy;
pub use python::PythonPolicy;

/// Counts of `{` and `}` over the whole text.
pub(crate) fn brace_counts(code: &str) -> (usize, usize) {
    code.chars().fold((0, 0), |(open, close), c| match c {
        '{' => (open + 1, close),
        '}' => (open, close + 1),
        _ => (open, close),
    })
}
