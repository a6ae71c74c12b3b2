//! Reusable sub-patterns.
//!
//! Value patterns bind `@value` and, for localized strings, `@key`. They are
//! spliced verbatim into larger patterns such as [`property_pattern`].

/// A string literal, or a `localize('key', 'value')` call whose first two
/// arguments are literals. `nls.localize(...)` is accepted as well.
pub const STRING_VALUE: &str = r#"[
  (string) @value
  (call_expression
    function: [
      (identifier) @localize
      (member_expression property: (property_identifier) @localize)
    ]
    arguments: (arguments . (string) @key . (string) @value)
    (#eq? @localize "localize"))
]"#;

/// An array literal; its elements are matched one by one.
pub const ARRAY_VALUE: &str = "(array) @array";

/// Any named node.
pub const ANY_VALUE: &str = "(_)";

/// Capture bound to the object literal holding a property.
pub const OBJECT: &str = "property.object";
/// Capture bound to the `key: value` pair of a property.
pub const PAIR: &str = "property.pair";
/// Capture bound to an array element matched by [`element_pattern`].
pub const ELEMENT: &str = "element";

/// A `key: value` pair directly inside an object literal, where the key is
/// `key` (quoted or not) and the value matches `value`.
pub fn property_pattern(key: &str, value: &str) -> String {
    format!(
        r#"(object
  (pair
    key: [
      (property_identifier) @property.key
      (string (string_fragment) @property.key)
    ]
    value: {value}) @{PAIR}
  (#eq? @property.key "{key}")) @{OBJECT}"#,
        key = escape_literal(key),
    )
}

/// `value` with the whole matched node bound to `@element`.
pub fn element_pattern(value: &str) -> String {
    format!("{value} @{ELEMENT}")
}

fn escape_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pattern;

    #[test]
    fn test_patterns_compile() {
        for value in [STRING_VALUE, ARRAY_VALUE, ANY_VALUE] {
            Pattern::new(&property_pattern("enumDescriptions", value)).unwrap();
        }
        Pattern::new(&element_pattern(STRING_VALUE)).unwrap();
    }

    #[test]
    fn test_key_is_escaped() {
        let pattern = property_pattern(r#"a"b"#, ANY_VALUE);
        assert!(pattern.contains(r#""a\"b""#));
        Pattern::new(&pattern).unwrap();
    }
}
