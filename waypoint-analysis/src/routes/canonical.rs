//! Route canonicalization for duplicate detection.
//!
//! Two routes collide when real dispatch cannot tell them apart: parameter
//! names do not matter, but type-constraining constraints do. `/a/{x:int}`
//! and `/a/{y:int}` collide; `/a/{x:int}` and `/a/{x:guid}` do not.

use crate::constraints::table::is_format_only;
use crate::model::HttpVerb;

use super::types::RoutePattern;

/// Build the canonical dispatch key for one verb + pattern.
///
/// Verb uppercased; pattern trimmed, leading slash enforced, trailing slash
/// stripped (except root); each segment becomes a lowercased literal or a
/// `{?}` / `{**}` placeholder plus the sorted set of type-constraining
/// constraint names on it.
pub fn canonical_route_key(verb: HttpVerb, pattern: &RoutePattern) -> String {
    let mut path = pattern.raw.trim().to_string();
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    let mut key = String::with_capacity(path.len() + 8);
    key.push_str(verb.as_str());
    key.push(' ');

    let mut param_index = 0usize;
    for (i, segment) in split_segments(&path).into_iter().enumerate() {
        if i > 0 {
            key.push('/');
        }
        let group_count = count_groups(segment);
        if group_count == 0 {
            key.push_str(&unescape_lower(segment));
            continue;
        }

        let start = param_index.min(pattern.parameters.len());
        let end = (param_index + group_count).min(pattern.parameters.len());
        let params = &pattern.parameters[start..end];
        param_index += group_count;

        let catch_all = params.iter().any(|p| p.catch_all);
        key.push_str(if catch_all { "{**}" } else { "{?}" });

        let mut names: Vec<&str> = params
            .iter()
            .flat_map(|p| p.constraints.iter())
            .map(|c| c.name.as_str())
            .filter(|name| !is_format_only(name))
            .collect();
        names.sort_unstable();
        names.dedup();
        for name in names {
            key.push(':');
            key.push_str(&name.to_ascii_lowercase());
        }
    }

    key
}

/// Split a pattern on `/` at group depth zero. A slash inside an unescaped
/// `{...}` group (a constraint argument, e.g. `regex(a/b)`) does not end the
/// segment.
fn split_segments(path: &str) -> Vec<&str> {
    let bytes = path.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => i += 2,
            b'}' if bytes.get(i + 1) == Some(&b'}') => i += 2,
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            b'/' if depth == 0 => {
                segments.push(&path[start..i]);
                start = i + 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    segments.push(&path[start..]);
    segments
}

/// Count unescaped `{...}` groups in one segment.
fn count_groups(segment: &str) -> usize {
    let chars: Vec<char> = segment.chars().collect();
    let mut count = 0;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '{' if chars.get(i + 1) == Some(&'{') => i += 2,
            '}' if chars.get(i + 1) == Some(&'}') => i += 2,
            '{' => {
                count += 1;
                // Skip to the matching close.
                i += 1;
                while i < chars.len() && chars[i] != '}' {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    count
}

/// Collapse brace escapes and lowercase a literal segment.
fn unescape_lower(segment: &str) -> String {
    segment
        .replace("{{", "{")
        .replace("}}", "}")
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::diagnostics::{DiagnosticSink, SourceLocation};

    fn key(verb: HttpVerb, raw: &str) -> String {
        let mut sink = DiagnosticSink::new();
        let pattern =
            crate::routes::parse_route_pattern(raw, &SourceLocation::default(), &mut sink)
                .expect("pattern parses");
        canonical_route_key(verb, &pattern)
    }

    #[test]
    fn parameter_names_do_not_matter() {
        assert_eq!(key(HttpVerb::Get, "/a/{x}"), key(HttpVerb::Get, "/a/{y}"));
    }

    #[test]
    fn constraint_types_do_matter() {
        assert_ne!(key(HttpVerb::Get, "/a/{x:int}"), key(HttpVerb::Get, "/a/{x:guid}"));
    }

    #[test]
    fn format_only_constraints_are_ignored() {
        assert_eq!(key(HttpVerb::Get, "/a/{x:int:min(1)}"), key(HttpVerb::Get, "/a/{y:int}"));
    }

    #[test]
    fn slash_normalization() {
        assert_eq!(key(HttpVerb::Get, "users/"), key(HttpVerb::Get, "/users"));
        assert_eq!(key(HttpVerb::Get, "/"), "GET /");
    }

    #[test]
    fn slash_inside_constraint_argument_stays_in_its_segment() {
        assert_eq!(
            key(HttpVerb::Get, "/files/{name:regex(a/b)}"),
            key(HttpVerb::Get, "/files/{other:regex(c/d)}")
        );
        assert_ne!(
            key(HttpVerb::Get, "/files/{name:regex(a/b)}"),
            key(HttpVerb::Get, "/files/{name}/extra")
        );
    }

    #[test]
    fn catch_all_placeholder_differs() {
        assert_ne!(key(HttpVerb::Get, "/f/{*rest}"), key(HttpVerb::Get, "/f/{rest}"));
    }
}
