//! Identifier conversion between OpenAPI names and Rust names.
//!
//! OpenAPI names come in every style (`getUsers`, `confirmed_at`,
//! `UserSchema`, `list-items`). Generated code needs PascalCase type names,
//! snake_case field and function names, and the original camelCase
//! operation names as registry keys.
//!
//! ## Examples
//!
//! ```
//! use splitapi_gen::naming::{to_camel_case, to_pascal_case, to_snake_case};
//!
//! assert_eq!(to_pascal_case("getUsers"), "GetUsers");
//! assert_eq!(to_snake_case("getUsers"), "get_users");
//! assert_eq!(to_camel_case("get_users"), "getUsers");
//! assert_eq!(to_snake_case("HTTPClient"), "http_client");
//! ```

use proc_macro2::{Ident, Span};

/// Words that cannot be used as plain identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers either.
const RESERVED: &[&str] = &["crate", "self", "Self", "super"];

/// Splits a name into words.
///
/// Separators (`_`, `-`, spaces, `.`, `/`) always split. Within a run of
/// letters, CamelCase boundaries split:
/// - "getUsers" -> ["get", "Users"]
/// - "HTTPClient" -> ["HTTP", "Client"]
/// - "confirmed_at" -> ["confirmed", "at"]
/// - "v1" -> ["v1"]
pub fn split_words(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_alphanumeric())
        .flat_map(split_camel_case)
        .collect()
}

fn split_camel_case(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    let chars: Vec<(usize, char)> = s.char_indices().collect();

    for i in 1..chars.len() {
        let (idx, current) = chars[i];
        let prev = chars[i - 1].1;

        // Split before uppercase that follows lowercase or a digit: "getUsers" -> "get", "Users"
        // Split before uppercase followed by lowercase when preceded by uppercase: "HTTPClient" -> "HTTP", "Client"
        let is_new_word = current.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (i + 1 < chars.len() && chars[i + 1].1.is_lowercase() && prev.is_uppercase()));

        if is_new_word {
            if idx > word_start {
                words.push(&s[word_start..idx]);
            }
            word_start = idx;
        }
    }

    if word_start < s.len() {
        words.push(&s[word_start..]);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Converts a name to PascalCase (`getUsers` -> `GetUsers`).
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).into_iter().map(capitalize).collect()
}

/// Converts a name to snake_case (`getUsers` -> `get_users`).
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts a name to camelCase (`get_users` -> `getUsers`).
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .enumerate()
        .map(|(i, word)| if i == 0 { word.to_lowercase() } else { capitalize(word) })
        .collect()
}

/// Returns `true` if `s` can be turned into a Rust identifier by [`ident`].
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            s != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn prepare(name: &str) -> String {
    let mut name = name.to_string();
    if name.is_empty() {
        name.push('_');
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

/// Returns `true` if [`ident`] accepts the already-cased `name`.
///
/// Non-ASCII letters are fine (`área`); characters that are alphanumeric
/// but not identifier characters (`²`, `½`) are not.
///
/// ```
/// use splitapi_gen::naming::is_rust_ident;
///
/// assert!(is_rust_ident("first_name"));
/// assert!(is_rust_ident("type"));
/// assert!(!is_rust_ident("area_m²"));
/// ```
pub fn is_rust_ident(name: &str) -> bool {
    let name = prepare(name);
    name == "_"
        || RESERVED.contains(&name.as_str())
        || KEYWORDS.contains(&name.as_str())
        || syn::parse_str::<syn::Ident>(&name).is_ok()
}

/// Makes a usable Rust identifier out of an already-cased name.
///
/// Keywords become raw identifiers (`type` -> `r#type`); names that cannot
/// be raw identifiers get a trailing underscore (`self` -> `self_`); names
/// starting with a digit get a leading underscore.
///
/// ## Panics
///
/// Panics if `name` fails [`is_rust_ident`]; `validate_api` rejects such
/// names before code generation.
pub fn ident(name: &str) -> Ident {
    let name = prepare(name);

    if RESERVED.contains(&name.as_str()) {
        Ident::new(&format!("{name}_"), Span::call_site())
    } else if KEYWORDS.contains(&name.as_str()) {
        Ident::new_raw(&name, Span::call_site())
    } else {
        Ident::new(&name, Span::call_site())
    }
}

/// Identifier for a type named `name` in the document.
pub fn type_ident(name: &str) -> Ident {
    ident(&to_pascal_case(name))
}

/// Identifier for a field, parameter or function named `name` in the document.
pub fn field_ident(name: &str) -> Ident {
    ident(&to_snake_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_words_camel_case() {
        assert_eq!(split_words("getUsers"), vec!["get", "Users"]);
        assert_eq!(split_words("UserSchema"), vec!["User", "Schema"]);
    }

    #[test]
    fn split_words_with_acronym() {
        assert_eq!(split_words("HTTPClient"), vec!["HTTP", "Client"]);
        assert_eq!(split_words("OpenAI"), vec!["Open", "AI"]);
    }

    #[test]
    fn split_words_separators() {
        assert_eq!(split_words("confirmed_at"), vec!["confirmed", "at"]);
        assert_eq!(split_words("list-items"), vec!["list", "items"]);
        assert_eq!(split_words("/v1/user/{id}"), vec!["v1", "user", "id"]);
    }

    #[test]
    fn split_words_digit_boundary() {
        assert_eq!(split_words("v1User"), vec!["v1", "User"]);
    }

    #[test]
    fn split_words_empty() {
        assert_eq!(split_words(""), Vec::<&str>::new());
        assert_eq!(split_words("__"), Vec::<&str>::new());
    }

    #[test]
    fn rust_ident_check() {
        assert!(is_rust_ident("UserSchema"));
        assert!(is_rust_ident("self"));
        assert!(is_rust_ident("1st"));
        assert!(is_rust_ident("área"));
        assert!(!is_rust_ident("area_m²"));
        assert!(!is_rust_ident("half_½"));
    }

    #[test]
    fn pascal_case() {
        assert_eq!(to_pascal_case("serverApi"), "ServerApi");
        assert_eq!(to_pascal_case("server_api"), "ServerApi");
        assert_eq!(to_pascal_case("Error"), "Error");
        assert_eq!(to_pascal_case("UserSchema"), "UserSchema");
    }

    #[test]
    fn snake_case() {
        assert_eq!(to_snake_case("serverApi"), "server_api");
        assert_eq!(to_snake_case("first_name"), "first_name");
        assert_eq!(to_snake_case("dateCreated"), "date_created");
    }

    #[test]
    fn camel_case() {
        assert_eq!(to_camel_case("GetUsers"), "getUsers");
        assert_eq!(to_camel_case("get_users"), "getUsers");
        assert_eq!(to_camel_case("getUsers"), "getUsers");
    }

    #[test]
    fn keywords_become_raw_identifiers() {
        assert_eq!(ident("type").to_string(), "r#type");
        assert_eq!(ident("self").to_string(), "self_");
        assert_eq!(ident("2fa").to_string(), "_2fa");
        assert_eq!(ident("email").to_string(), "email");
    }

    #[test]
    fn identifier_validity() {
        assert!(is_valid_identifier("ServerApi"));
        assert!(is_valid_identifier("_private"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("_"));
        assert!(!is_valid_identifier("1st"));
        assert!(!is_valid_identifier("server-api"));
    }
}
