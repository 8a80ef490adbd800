use super::Language;

const PYTHON: &str = include_str!("samples/fibonacci.py");
const JAVA: &str = include_str!("samples/Main.java");
const HTML: &str = include_str!("samples/counter.html");

/// Canonical example document loaded when switching to `language`.
pub fn sample(language: Language) -> &'static str {
    match language {
        Language::Python => PYTHON,
        Language::Java => JAVA,
        Language::Html => HTML,
    }
}
