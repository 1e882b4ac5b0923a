use relay::dispatch::matcher::{matches, pathname, proto_host};

#[test]
fn test_root_prefix_matches_everything() {
    assert!(matches("/", "/"));
    assert!(matches("/anything", "/"));
    assert!(matches("/a/b/c", "/"));
}

#[test]
fn test_prefix_must_end_on_a_boundary() {
    assert!(matches("/foo", "/foo"));
    assert!(matches("/foo/", "/foo"));
    assert!(matches("/foo/bar", "/foo"));
    assert!(matches("/foo.bar", "/foo"));
    assert!(!matches("/foobar", "/foo"));
}

#[test]
fn test_matching_is_case_insensitive() {
    assert!(matches("/foo/bar", "/Foo"));
    assert!(matches("/FOO", "/foo"));
    assert!(matches("/Admin/Users", "/admin"));
}

#[test]
fn test_prefix_longer_than_path_never_matches() {
    assert!(!matches("/fo", "/foo"));
    assert!(!matches("/", "/foo"));
}

#[test]
fn test_pathname_excludes_query_string() {
    assert_eq!(pathname("/a/b?c=d"), "/a/b");
    assert_eq!(pathname("/a/b"), "/a/b");
}

#[test]
fn test_pathname_excludes_scheme_and_host() {
    assert_eq!(pathname("http://example.com/a/b"), "/a/b");
    assert_eq!(pathname("http://example.com/a?c=d"), "/a");
}

#[test]
fn test_empty_pathname_is_the_root() {
    assert_eq!(pathname(""), "/");
}

#[test]
fn test_proto_host_of_origin_form_target() {
    assert_eq!(proto_host("/a/b"), None);
    assert_eq!(proto_host(""), None);
}

#[test]
fn test_proto_host_of_absolute_form_target() {
    assert_eq!(
        proto_host("http://example.com/a/b"),
        Some("http://example.com")
    );
    assert_eq!(
        proto_host("https://example.com:8443/"),
        Some("https://example.com:8443")
    );
}

#[test]
fn test_proto_host_ignores_scheme_markers_in_the_query() {
    // The "://" here is part of the query, not a scheme separator.
    assert_eq!(proto_host("foo?next=http://other/x"), None);
}

#[test]
fn test_proto_host_without_a_path_component() {
    assert_eq!(proto_host("http://example.com"), None);
}
