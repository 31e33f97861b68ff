//! Route pattern parser.
//!
//! Grammar: `{` `*`? name (`:`constraint(`(args)`)?)* `?`? `}` with
//! name = `[A-Za-z_][A-Za-z0-9_]*`. Literal braces are escaped as `{{`/`}}`;
//! escapes are stripped before matching but the raw pattern is preserved for
//! diagnostic display. Everything is non-fatal except an empty pattern: the
//! parser keeps going and reports what it saw, so one bad group never hides
//! the rest.

use smallvec::SmallVec;
use waypoint_core::diagnostics::{DiagnosticCode, DiagnosticSink, SourceLocation};

use super::types::{RouteConstraint, RouteParameter, RoutePattern};

/// Parse a raw route pattern. `None` only for the fatal empty-pattern case;
/// any other malformation yields diagnostics plus a best-effort result.
/// Every `{...}` group produces exactly one `RouteParameter`.
pub fn parse_route_pattern(
    pattern: &str,
    location: &SourceLocation,
    sink: &mut DiagnosticSink,
) -> Option<RoutePattern> {
    if pattern.trim().is_empty() {
        sink.report(DiagnosticCode::RouteEmptyPattern, location.clone(), std::iter::empty::<&str>());
        return None;
    }

    let chars: Vec<char> = pattern.chars().collect();
    let len = chars.len();
    let mut groups: Vec<Group> = Vec::new();
    let mut unbalanced = false;
    let mut i = 0;

    while i < len {
        match chars[i] {
            '{' if chars.get(i + 1) == Some(&'{') => i += 2,
            '}' if chars.get(i + 1) == Some(&'}') => i += 2,
            '{' => {
                let (group, next) = scan_group(&chars, i, &mut unbalanced);
                groups.push(group);
                i = next;
            }
            '}' => {
                // Closing brace with no open group.
                unbalanced = true;
                i += 1;
            }
            _ => i += 1,
        }
    }

    if unbalanced {
        sink.report(DiagnosticCode::RouteUnbalancedBraces, location.clone(), [pattern]);
    }

    let last_group = groups.len().saturating_sub(1);
    let mut parameters = Vec::with_capacity(groups.len());
    for (index, group) in groups.iter().enumerate() {
        let parameter = parse_group(&group.inner, pattern, location, sink);
        if parameter.catch_all && !(index == last_group && group.terminates) {
            sink.report(
                DiagnosticCode::RouteCatchAllNotLast,
                location.clone(),
                [parameter.name.as_str()],
            );
        }
        if parameter.optional && index != last_group {
            sink.report(
                DiagnosticCode::RouteOptionalNotLast,
                location.clone(),
                [parameter.name.as_str()],
            );
        }
        parameters.push(parameter);
    }

    report_duplicates(&parameters, location, sink);

    Some(RoutePattern { raw: pattern.to_string(), parameters })
}

struct Group {
    inner: String,
    /// True when the group's closing brace ends the pattern (ignoring
    /// trailing whitespace). Catch-alls must terminate the pattern.
    terminates: bool,
}

/// Scan one `{...}` group starting at the opening brace. Returns the group
/// and the index just past it. Escaped braces inside the group are unescaped
/// into the inner text.
fn scan_group(chars: &[char], open: usize, unbalanced: &mut bool) -> (Group, usize) {
    let len = chars.len();
    let mut inner = String::new();
    let mut j = open + 1;
    let mut closed_at = None;

    while j < len {
        match chars[j] {
            '}' if chars.get(j + 1) == Some(&'}') => {
                inner.push('}');
                j += 2;
            }
            '{' if chars.get(j + 1) == Some(&'{') => {
                inner.push('{');
                j += 2;
            }
            '}' => {
                closed_at = Some(j);
                break;
            }
            '{' => {
                // Nested unescaped open brace: malformed.
                *unbalanced = true;
                inner.push('{');
                j += 1;
            }
            c => {
                inner.push(c);
                j += 1;
            }
        }
    }

    match closed_at {
        Some(close) => {
            let terminates = chars[close + 1..].iter().all(|c| c.is_whitespace());
            (Group { inner, terminates }, close + 1)
        }
        None => {
            // Ran off the end without a closing brace.
            *unbalanced = true;
            (Group { inner, terminates: false }, len)
        }
    }
}

/// Parse the inside of one group into a `RouteParameter`.
fn parse_group(
    inner: &str,
    raw_pattern: &str,
    location: &SourceLocation,
    sink: &mut DiagnosticSink,
) -> RouteParameter {
    let mut rest = inner;
    let catch_all = rest.starts_with('*');
    if catch_all {
        rest = &rest[1..];
    }
    let mut optional = false;
    if let Some(stripped) = rest.strip_suffix('?') {
        optional = true;
        rest = stripped;
    }

    let mut parts = split_constraints(rest);
    let name = parts.remove(0).to_string();

    if inner.trim().is_empty() {
        sink.report(DiagnosticCode::RouteEmptyParameter, location.clone(), [raw_pattern]);
    } else if !is_valid_name(&name) {
        sink.report(
            DiagnosticCode::RouteInvalidParameterName,
            location.clone(),
            [if name.is_empty() { inner } else { name.as_str() }],
        );
    }

    let constraints: SmallVec<[RouteConstraint; 2]> =
        parts.iter().map(|text| parse_constraint(text)).collect();

    RouteParameter { name, constraints, optional, catch_all }
}

/// Split `name:c1:c2(a,b)` on `:` at paren depth zero. Always yields at
/// least one element (the name, possibly empty).
fn split_constraints(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Parse `min(5)` into name + argument; bare `int` has no argument.
fn parse_constraint(text: &str) -> RouteConstraint {
    match text.find('(') {
        Some(open) if text.ends_with(')') => RouteConstraint {
            name: text[..open].to_string(),
            argument: Some(text[open + 1..text.len() - 1].to_string()),
        },
        _ => RouteConstraint { name: text.to_string(), argument: None },
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Case-insensitive duplicate-name detection; every repeat after the first
/// is reported. Unnamed (diagnosed) groups are skipped.
fn report_duplicates(
    parameters: &[RouteParameter],
    location: &SourceLocation,
    sink: &mut DiagnosticSink,
) {
    let mut seen: Vec<String> = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        if parameter.name.is_empty() {
            continue;
        }
        let folded = parameter.name.to_ascii_lowercase();
        if seen.contains(&folded) {
            sink.report(
                DiagnosticCode::RouteDuplicateParameter,
                location.clone(),
                [parameter.name.as_str()],
            );
        } else {
            seen.push(folded);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pattern: &str) -> (Option<RoutePattern>, DiagnosticSink) {
        let mut sink = DiagnosticSink::new();
        let result = parse_route_pattern(pattern, &SourceLocation::default(), &mut sink);
        (result, sink)
    }

    #[test]
    fn plain_literal_has_no_parameters() {
        let (result, sink) = parse("/users/all");
        assert!(sink.is_empty());
        assert!(result.unwrap().parameters.is_empty());
    }

    #[test]
    fn escaped_braces_are_literals() {
        let (result, sink) = parse("/literal/{{not-a-param}}");
        assert!(sink.is_empty());
        assert!(result.unwrap().parameters.is_empty());
    }

    #[test]
    fn constraint_argument_with_colon_stays_intact() {
        let (result, _) = parse("/files/{name:regex(a:b)}");
        let pattern = result.unwrap();
        assert_eq!(pattern.parameters[0].constraints[0].argument.as_deref(), Some("a:b"));
    }
}
