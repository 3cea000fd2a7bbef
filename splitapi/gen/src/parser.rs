//! Path template handling.
//!
//! Extracts parameter names from URL path templates that use `{param}` syntax
//! and rewrites templates into `format!` strings for generated code.

/// Extracts parameter names from a path template.
///
/// ## Examples
///
/// ```
/// use splitapi_gen::parser::extract_path_params;
///
/// assert_eq!(extract_path_params("/v1/user"), vec![] as Vec<&str>);
/// assert_eq!(extract_path_params("/v1/user/{user_id}"), vec!["user_id"]);
/// assert_eq!(
///     extract_path_params("/v1/course/{course_id}/user/{user_id}"),
///     vec!["course_id", "user_id"]
/// );
/// ```
pub fn extract_path_params(path: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = None;

    for (idx, c) in path.char_indices() {
        if c == '{' {
            start = Some(idx + 1);
        } else if c == '}'
            && let Some(pos) = start.take()
        {
            let param = &path[pos..idx];
            if !param.is_empty() {
                params.push(param);
            }
        }
    }

    params
}

/// Rewrites a path template into a `format!` string.
///
/// Each `{param}` becomes `{}`; arguments are supplied in
/// [`extract_path_params`] order.
///
/// ## Examples
///
/// ```
/// use splitapi_gen::parser::path_format_string;
///
/// assert_eq!(path_format_string("/v1/user/{user_id}/roles"), "/v1/user/{}/roles");
/// ```
pub fn path_format_string(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut in_param = false;

    for c in path.chars() {
        match c {
            '{' => {
                in_param = true;
                out.push_str("{}");
            }
            '}' if in_param => in_param = false,
            '}' => out.push_str("}}"),
            _ if in_param => {}
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_no_params() {
        assert!(extract_path_params("/v1/user").is_empty());
        assert!(extract_path_params("/").is_empty());
        assert!(extract_path_params("").is_empty());
    }

    #[test]
    fn extract_single_param() {
        assert_eq!(extract_path_params("/v1/user/{user_id}"), vec!["user_id"]);
    }

    #[test]
    fn extract_multiple_params() {
        assert_eq!(
            extract_path_params("/v1/course/{course_id}/assignment/{assignment_id}"),
            vec!["course_id", "assignment_id"]
        );
    }

    #[test]
    fn extract_consecutive_params() {
        assert_eq!(extract_path_params("/{a}{b}"), vec!["a", "b"]);
    }

    #[test]
    fn extract_param_at_start() {
        assert_eq!(extract_path_params("{root}/items"), vec!["root"]);
    }

    #[test]
    fn extract_ignores_empty_braces() {
        assert!(extract_path_params("/v1/{}").is_empty());
    }

    #[test]
    fn format_string_without_params_is_unchanged() {
        assert_eq!(path_format_string("/v1/user"), "/v1/user");
    }

    #[test]
    fn format_string_replaces_each_param() {
        assert_eq!(
            path_format_string("/v1/course/{course_id}/user/{user_id}"),
            "/v1/course/{}/user/{}"
        );
    }

    #[test]
    fn format_string_escapes_stray_closing_brace() {
        assert_eq!(path_format_string("/odd}/{id}"), "/odd}}/{}");
    }
}
