//! Path composition for route groups.
//!
//! Group prefixes and route paths are joined and then cleaned lexically, so
//! `"/api/"` + `"v1/"` and `"/api"` + `"/v1"` both produce `"/api/v1"`.

/// Lexically cleans a rooted URL path.
///
/// Repeated slashes collapse to one, `.` segments vanish, `..` removes the
/// previous segment (never climbing above the root) and trailing slashes are
/// dropped. The result always starts with `/`; the empty path cleans to `/`.
pub(crate) fn clean(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return "/".to_owned();
    }

    let mut out = String::with_capacity(path.len() + 1);
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    out
}

/// Joins a group prefix and a relative path, then cleans the result.
///
/// The relative path is always treated as one or more further segments, so a
/// missing leading slash (`"v1"`) is the same as `"/v1"`.
pub(crate) fn join(prefix: &str, relative: &str) -> String {
    clean(&format!("{prefix}/{relative}"))
}

/// Rewrites `:name` and `*name` segments into matchit's brace syntax.
///
/// Segments already written as `{name}` / `{*name}` pass through untouched.
pub(crate) fn to_matchit(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|segment| {
            if let Some(name) = segment.strip_prefix(':') {
                format!("{{{name}}}")
            } else if let Some(name) = segment.strip_prefix('*') {
                format!("{{*{name}}}")
            } else {
                segment.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collapses_and_trims() {
        assert_eq!(clean("/users//123/"), "/users/123");
        assert_eq!(clean(""), "/");
        assert_eq!(clean("/"), "/");
        assert_eq!(clean("a/b"), "/a/b");
    }

    #[test]
    fn clean_resolves_dots() {
        assert_eq!(clean("/a/./b/../c"), "/a/c");
        assert_eq!(clean("/../../x"), "/x");
    }

    #[test]
    fn join_ignores_slash_placement() {
        assert_eq!(join("/api/", "/v1/"), "/api/v1");
        assert_eq!(join("/api", "v1"), "/api/v1");
        assert_eq!(join("/", "/"), "/");
        assert_eq!(join("/api/v1", ""), "/api/v1");
    }

    #[test]
    fn matchit_syntax() {
        assert_eq!(to_matchit("/users/:id/info"), "/users/{id}/info");
        assert_eq!(to_matchit("/static/*filepath"), "/static/{*filepath}");
        assert_eq!(to_matchit("/users/{id}"), "/users/{id}");
        assert_eq!(to_matchit("/"), "/");
    }
}
