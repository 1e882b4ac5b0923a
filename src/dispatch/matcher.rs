//! Pure prefix-matching rules for request targets.

/// Returns the scheme+host prefix of an absolute-form request target
/// (e.g. `http://example.com` out of `http://example.com/a/b`).
///
/// Origin-form targets (starting with `/`) have none. The prefix is
/// returned as a byte-exact slice of the target so stripping and
/// restoration never alter it.
pub fn proto_host(target: &str) -> Option<&str> {
    if target.is_empty() || target.starts_with('/') {
        return None;
    }

    // Only look for the scheme separator before any query string.
    let path_len = target.find('?').unwrap_or(target.len());
    let scheme_end = target[..path_len].find("://")?;

    let host = &target[scheme_end + 3..];
    let slash = host.find('/')?;
    Some(&target[..scheme_end + 3 + slash])
}

/// Returns the path component of a request target: the scheme+host prefix
/// of an absolute-form target and any query string are excluded. An empty
/// path maps to the root.
pub fn pathname(target: &str) -> &str {
    let rest = match proto_host(target) {
        Some(host) => &target[host.len()..],
        None => target,
    };

    let end = rest.find('?').unwrap_or(rest.len());
    let path = &rest[..end];

    if path.is_empty() { "/" } else { path }
}

/// Decides whether `path` is under the mount prefix `prefix`.
///
/// True iff, ASCII case-insensitively, `path` starts with `prefix` AND
/// either the prefix consumes the whole path or the next byte is `/` or
/// `.`. The boundary check keeps `/foo` from matching `/foobar` while
/// still matching `/foo`, `/foo/`, `/foo/bar` and `/foo.bar`. The root
/// prefix matches everything.
pub fn matches(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() || prefix == "/" {
        return true;
    }

    let path = path.as_bytes();
    let prefix = prefix.as_bytes();

    if path.len() < prefix.len() || !path[..prefix.len()].eq_ignore_ascii_case(prefix) {
        return false;
    }

    match path.get(prefix.len()).copied() {
        None => true,
        Some(b'/') | Some(b'.') => true,
        Some(_) => false,
    }
}
