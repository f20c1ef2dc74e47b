//! Custom message headers

/// One or more values for a single header
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderValues(pub Vec<String>);

impl From<&str> for HeaderValues {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for HeaderValues {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for HeaderValues {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<Vec<&str>> for HeaderValues {
    fn from(values: Vec<&str>) -> Self {
        Self(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for HeaderValues {
    fn from(values: [&str; N]) -> Self {
        Self(values.into_iter().map(str::to_string).collect())
    }
}

/// Normalizes a header name: strips a leading `h:` and lower-cases the rest.
pub fn normalize_header_name(name: &str) -> String {
    strip_prefix_ignore_case(name, "h:").to_lowercase()
}

/// Strips `prefix` from the start of `name`, ignoring ASCII case.
fn strip_prefix_ignore_case<'a>(name: &'a str, prefix: &str) -> &'a str {
    match name.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &name[prefix.len()..],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_prefix() {
        assert_eq!(normalize_header_name("X-Custom"), "x-custom");
        assert_eq!(normalize_header_name("h:X-Custom"), "x-custom");
        assert_eq!(normalize_header_name("H:Foo"), "foo");
        assert_eq!(normalize_header_name("foo"), "foo");
    }

    #[test]
    fn test_prefix_is_only_stripped_at_start() {
        assert_eq!(normalize_header_name("x-h:foo"), "x-h:foo");
    }

    #[test]
    fn test_header_values_from_single_and_many() {
        assert_eq!(HeaderValues::from("a").0, vec!["a"]);
        assert_eq!(HeaderValues::from(["a", "b", "c"]).0, vec!["a", "b", "c"]);
    }
}
