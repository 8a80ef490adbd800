use super::Language;

/// Fixed word lists driving the builtin and keyword highlight tiers.
#[derive(Debug, Clone, Copy)]
pub struct VocabularyTable {
    pub keywords: &'static [&'static str],
    pub builtins: &'static [&'static str],
}

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "return", "if", "else", "for", "in", "range", "import", "from", "class", "True",
    "False", "None", "and", "or", "not", "while", "break", "continue", "pass", "try", "except",
    "finally", "with", "as", "lambda", "yield",
];

const PYTHON_BUILTINS: &[&str] = &[
    "print", "len", "range", "str", "int", "float", "list", "dict", "set", "tuple", "sum", "min",
    "max", "abs", "round", "sorted", "enumerate", "zip", "map", "filter",
];

const JAVA_KEYWORDS: &[&str] = &[
    "public", "private", "protected", "static", "void", "int", "double", "float", "String",
    "boolean", "class", "return", "if", "else", "for", "while", "new", "this", "super", "extends",
    "implements", "import", "package", "true", "false", "null", "try", "catch", "finally",
    "throw", "throws",
];

const JAVA_BUILTINS: &[&str] = &[
    "System", "String", "Math", "Integer", "Double", "Boolean", "Array", "List", "ArrayList",
    "HashMap", "println", "print",
];

const HTML_KEYWORDS: &[&str] = &[
    "DOCTYPE", "html", "head", "body", "title", "style", "script", "div", "span", "a", "img",
    "input", "button", "form", "meta", "link",
];

pub fn vocabulary(language: Language) -> VocabularyTable {
    match language {
        Language::Python => VocabularyTable {
            keywords: PYTHON_KEYWORDS,
            builtins: PYTHON_BUILTINS,
        },
        Language::Java => VocabularyTable {
            keywords: JAVA_KEYWORDS,
            builtins: JAVA_BUILTINS,
        },
        Language::Html => VocabularyTable {
            keywords: HTML_KEYWORDS,
            builtins: &[],
        },
    }
}
