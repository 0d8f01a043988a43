/// Compile a regex literal once and hand out a `&'static Regex`.
///
/// The pattern is compiled lazily on first use and shared afterwards, so call
/// sites in hot scanning loops pay for compilation exactly once.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).expect("regex literal must compile"));
        &*RE
    }};
}
