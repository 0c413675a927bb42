//! Automatic module naming.
//!
//! A jar placed on the module path without a compiled descriptor gets its
//! module name from the `Automatic-Module-Name` manifest attribute or, failing
//! that, from its file name.

use once_cell::sync::Lazy;
use regex::Regex;

static DASH_VERSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"-(\d+(\.|$))").unwrap());
static NON_ALPHANUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());
static REPEATING_DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.{2,}").unwrap());

const RESERVED: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Derives the automatic module name the module system would assign to a jar
/// with this file name. Returns `None` when no legal module name results.
pub fn derive_automatic_module_name(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(".jar").unwrap_or(file_name);

    let name = match DASH_VERSION.find(stem) {
        Some(m) => &stem[..m.start()],
        None => stem,
    };

    let cleaned = NON_ALPHANUM.replace_all(name, ".");
    let cleaned = REPEATING_DOTS.replace_all(&cleaned, ".");
    let cleaned = cleaned.trim_matches('.');

    if is_legal_module_name(cleaned) {
        Some(cleaned.to_string())
    } else {
        None
    }
}

/// Dot-separated Java identifiers, none of them a reserved word.
pub fn is_legal_module_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    name.split('.').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
            _ => return false,
        }
        chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') && !RESERVED.contains(&segment)
    })
}
