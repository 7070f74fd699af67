//! Field name to document path mapping.
//!
//! Paths are relative to the enclosing node. Nesting is expressed by the
//! document itself (`[motd]`, `[message.title]`), so a field never carries
//! its parent's name in its own path.

use std::borrow::Cow;

/// Resolve the document path for a declared field.
///
/// An explicit override is used verbatim; otherwise the name is kebab-cased.
pub fn resolve(name: &'static str, explicit: Option<&'static str>) -> Cow<'static, str> {
    match explicit {
        Some(path) => Cow::Borrowed(path),
        None => Cow::Owned(kebab_case(name)),
    }
}

/// Convert `snake_case`, `camelCase` or `PascalCase` names to `kebab-case`.
///
/// Runs of capitals are treated as one word (`HTTPPort` -> `http-port`).
pub fn kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            push_separator(&mut out);
            continue;
        }

        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary {
                push_separator(&mut out);
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    while out.ends_with('-') {
        out.pop();
    }
    out
}

fn push_separator(out: &mut String) {
    if !out.is_empty() && !out.ends_with('-') {
        out.push('-');
    }
}

/// Join a parent prefix and a relative path into an absolute dotted path.
pub fn join(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        path.to_string()
    } else {
        format!("{prefix}.{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_to_kebab() {
        assert_eq!(kebab_case("bindAddress"), "bind-address");
        assert_eq!(kebab_case("subTitle"), "sub-title");
        assert_eq!(kebab_case("fadeIn"), "fade-in");
    }

    #[test]
    fn test_snake_case_to_kebab() {
        assert_eq!(kebab_case("bind_ports"), "bind-ports");
        assert_eq!(kebab_case("disable_fall"), "disable-fall");
        assert_eq!(kebab_case("x"), "x");
    }

    #[test]
    fn test_acronyms_stay_together() {
        assert_eq!(kebab_case("HTTPPort"), "http-port");
        assert_eq!(kebab_case("ipV4Address"), "ip-v4-address");
        assert_eq!(kebab_case("motdURL"), "motd-url");
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(kebab_case("_leading__double_"), "leading-double");
        assert_eq!(kebab_case("already-kebab"), "already-kebab");
    }

    #[test]
    fn test_explicit_override_is_verbatim() {
        assert_eq!(resolve("action_bar", Some("actionBar")), "actionBar");
        assert_eq!(resolve("action_bar", None), "action-bar");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for name in ["bindAddress", "bind_address", "forwardKey"] {
            assert_eq!(resolve(name, None), resolve(name, None));
        }
        assert_eq!(resolve("bindAddress", None), resolve("bind_address", None));
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "motd"), "motd");
        assert_eq!(join("message", "title"), "message.title");
    }
}
