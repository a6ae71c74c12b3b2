//! Typed extraction of object-literal properties.
//!
//! A [`PropertyDescriptor`] pairs a value sub-pattern with a reification step.
//! [`PropertyExtractor::extract`] finds the named key among an object's pairs
//! and hands the value matches to the descriptor.

use crate::patterns::{
    ANY_VALUE, ARRAY_VALUE, ELEMENT, OBJECT, PAIR, STRING_VALUE, element_pattern,
    property_pattern,
};
use crate::{MatchRecord, Pattern, SyntaxError, string_literal};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tree_sitter::Node;

/// A literal default paired with the key used to look up translations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocalizedString {
    pub value: String,
    pub key: String,
}

/// A string property value. Plain and localized strings are told apart by
/// the shape of the source expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StringValue {
    Plain(String),
    Localized(LocalizedString),
}

#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("Property '{key}' has an unsupported value: {text}")]
    Malformed { key: String, text: String },
    #[error("Property '{key}' has an unsupported element: {text}")]
    MalformedElement { key: String, text: String },
    #[error("Missing required value for property '{key}'")]
    MissingValue { key: String },
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// What a descriptor needs besides its matches.
#[derive(Clone, Copy)]
pub struct ReifyContext<'a> {
    pub extractor: &'a PropertyExtractor,
    pub source: &'a str,
    pub key: &'a str,
}

/// How to match and reify one kind of property value.
pub trait PropertyDescriptor {
    type Output;

    /// Sub-pattern the property value must match.
    fn value_pattern(&self) -> &str;

    /// Turn the (non-empty) matches for one property into a value.
    fn reify(
        &self,
        cx: ReifyContext<'_>,
        matches: &[MatchRecord<'_>],
    ) -> Result<Self::Output, PropertyError>;
}

/// A string or localized string. Only the first match counts.
pub struct ScalarString;

/// An array literal of strings or localized strings, in source order.
pub struct StringArray;

impl PropertyDescriptor for ScalarString {
    type Output = StringValue;

    fn value_pattern(&self) -> &str {
        STRING_VALUE
    }

    fn reify(
        &self,
        cx: ReifyContext<'_>,
        matches: &[MatchRecord<'_>],
    ) -> Result<StringValue, PropertyError> {
        let first = matches.first().ok_or_else(|| PropertyError::MissingValue {
            key: cx.key.to_string(),
        })?;
        reify_string(cx, first)
    }
}

impl PropertyDescriptor for StringArray {
    type Output = Vec<StringValue>;

    fn value_pattern(&self) -> &str {
        ARRAY_VALUE
    }

    fn reify(
        &self,
        cx: ReifyContext<'_>,
        matches: &[MatchRecord<'_>],
    ) -> Result<Vec<StringValue>, PropertyError> {
        let Some(array) = matches.first().and_then(|m| m.get("array")) else {
            return Err(PropertyError::MissingValue {
                key: cx.key.to_string(),
            });
        };

        let element = cx.extractor.pattern(&element_pattern(STRING_VALUE))?;
        let mut values = Vec::new();
        let mut cursor = array.walk();
        for child in array.named_children(&mut cursor) {
            if child.kind() == "comment" {
                continue;
            }
            let record = element
                .matches(child, cx.source)
                .into_iter()
                .find(|m| m.get(ELEMENT) == Some(child))
                .ok_or_else(|| PropertyError::MalformedElement {
                    key: cx.key.to_string(),
                    text: snippet(child, cx.source),
                })?;
            values.push(reify_string(cx, &record)?);
        }
        Ok(values)
    }
}

fn reify_string(cx: ReifyContext<'_>, record: &MatchRecord<'_>) -> Result<StringValue, PropertyError> {
    let missing = || PropertyError::MissingValue {
        key: cx.key.to_string(),
    };

    let value = record
        .get("value")
        .map(|node| string_literal(node, cx.source))
        .ok_or_else(missing)?;
    if value.is_empty() {
        return Err(missing());
    }

    match record.get("key") {
        Some(node) => {
            let key = string_literal(node, cx.source);
            if key.is_empty() {
                return Err(missing());
            }
            Ok(StringValue::Localized(LocalizedString { value, key }))
        }
        None => Ok(StringValue::Plain(value)),
    }
}

fn snippet(node: Node, source: &str) -> String {
    const MAX_CHARS: usize = 60;
    let text = node.utf8_text(source.as_bytes()).unwrap_or("");
    let mut short: String = text.chars().take(MAX_CHARS).collect();
    if text.chars().count() > MAX_CHARS {
        short.push_str("...");
    }
    short
}

/// Looks up properties by key and reifies them through a descriptor.
///
/// Compiled patterns are cached by query text, so one extractor can be shared
/// across threads and files.
#[derive(Default)]
pub struct PropertyExtractor {
    cache: Mutex<HashMap<String, Arc<Pattern>>>,
}

impl PropertyExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `query`, or reuse an earlier compilation.
    pub fn pattern(&self, query: &str) -> Result<Arc<Pattern>, SyntaxError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pattern) = cache.get(query) {
            return Ok(Arc::clone(pattern));
        }
        let pattern = Arc::new(Pattern::new(query)?);
        cache.insert(query.to_string(), Arc::clone(&pattern));
        Ok(pattern)
    }

    /// Extract property `key` of the object literal `container`.
    ///
    /// Returns `Ok(None)` when the object has no such key. A key whose value
    /// does not have the descriptor's shape is an error, never a default.
    pub fn extract<D: PropertyDescriptor>(
        &self,
        descriptor: &D,
        container: Node<'_>,
        source: &str,
        key: &str,
    ) -> Result<Option<D::Output>, PropertyError> {
        let presence = self.pattern(&property_pattern(key, ANY_VALUE))?;
        let Some(pair) = presence
            .matches(container, source)
            .into_iter()
            .filter(|m| m.get(OBJECT) == Some(container))
            .find_map(|m| m.get(PAIR))
        else {
            return Ok(None);
        };

        let shaped = self.pattern(&property_pattern(key, descriptor.value_pattern()))?;
        let matches: Vec<_> = shaped
            .matches(container, source)
            .into_iter()
            .filter(|m| m.get(PAIR) == Some(pair))
            .collect();
        if matches.is_empty() {
            let value = pair.child_by_field_name("value").unwrap_or(pair);
            return Err(PropertyError::Malformed {
                key: key.to_string(),
                text: snippet(value, source),
            });
        }

        let cx = ReifyContext {
            extractor: self,
            source,
            key,
        };
        descriptor.reify(cx, &matches).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParsedSource, parse_typescript};

    /// Parse `const x = <object>;` and return the source with the object node.
    fn object(text: &str) -> (ParsedSource, usize) {
        let source = parse_typescript(format!("const x = {text};")).unwrap();
        (source, "const x = ".len())
    }

    fn extract<D: PropertyDescriptor>(
        descriptor: &D,
        text: &str,
        key: &str,
    ) -> Result<Option<D::Output>, PropertyError> {
        let (source, offset) = object(text);
        let node = source
            .root()
            .named_descendant_for_byte_range(offset, offset + 1)
            .unwrap();
        assert_eq!(node.kind(), "object");
        PropertyExtractor::new().extract(descriptor, node, source.text(), key)
    }

    fn localized(key: &str, value: &str) -> StringValue {
        StringValue::Localized(LocalizedString {
            value: value.into(),
            key: key.into(),
        })
    }

    #[test]
    fn test_plain_string() {
        let value = extract(&ScalarString, "{ name: 'UpdateMode' }", "name").unwrap();
        assert_eq!(value, Some(StringValue::Plain("UpdateMode".into())));
    }

    #[test]
    fn test_localized_string() {
        let value = extract(
            &ScalarString,
            r#"{ description: localize('updateMode', "Configure updates.") }"#,
            "description",
        )
        .unwrap();
        assert_eq!(value, Some(localized("updateMode", "Configure updates.")));
    }

    #[test]
    fn test_namespaced_localize() {
        let value = extract(
            &ScalarString,
            "{ description: nls.localize('k', 'v') }",
            "description",
        )
        .unwrap();
        assert_eq!(value, Some(localized("k", "v")));
    }

    #[test]
    fn test_quoted_key() {
        let value = extract(&ScalarString, r#"{ "type": "string" }"#, "type").unwrap();
        assert_eq!(value, Some(StringValue::Plain("string".into())));
    }

    #[test]
    fn test_absent_key() {
        let value = extract(&ScalarString, "{ other: 'x' }", "name").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_nested_key_is_not_a_property() {
        let value = extract(&ScalarString, "{ policy: { name: 'Inner' } }", "name").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let value = extract(&ScalarString, "{ name: 'First', name: 'Second' }", "name").unwrap();
        assert_eq!(value, Some(StringValue::Plain("First".into())));
    }

    #[test]
    fn test_empty_value_is_error() {
        let err = extract(&ScalarString, "{ name: '' }", "name").unwrap_err();
        assert!(matches!(err, PropertyError::MissingValue { ref key } if key == "name"));
    }

    #[test]
    fn test_malformed_value_is_error() {
        let err = extract(&ScalarString, "{ name: someIdentifier }", "name").unwrap_err();
        match err {
            PropertyError::Malformed { key, text } => {
                assert_eq!(key, "name");
                assert_eq!(text, "someIdentifier");
            }
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_other_call_is_malformed() {
        let err = extract(&ScalarString, "{ name: translate('k', 'v') }", "name").unwrap_err();
        assert!(matches!(err, PropertyError::Malformed { .. }));
    }

    #[test]
    fn test_string_array() {
        let value = extract(
            &StringArray,
            "{ enumDescriptions: [localize('a', 'Alpha'), 'plain', /* note */ localize('c', 'Gamma')] }",
            "enumDescriptions",
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            value,
            vec![
                localized("a", "Alpha"),
                StringValue::Plain("plain".into()),
                localized("c", "Gamma"),
            ]
        );
    }

    #[test]
    fn test_empty_array_is_present() {
        let value = extract(&StringArray, "{ enum: [] }", "enum").unwrap();
        assert_eq!(value, Some(Vec::new()));
    }

    #[test]
    fn test_array_with_unsupported_element() {
        let err = extract(&StringArray, "{ enum: ['a', 42] }", "enum").unwrap_err();
        match err {
            PropertyError::MalformedElement { key, text } => {
                assert_eq!(key, "enum");
                assert_eq!(text, "42");
            }
            other => panic!("expected MalformedElement, got {other:?}"),
        }
    }

    #[test]
    fn test_array_property_not_an_array() {
        let err = extract(&StringArray, "{ enum: 'a' }", "enum").unwrap_err();
        assert!(matches!(err, PropertyError::Malformed { .. }));
    }

    #[test]
    fn test_pattern_cache_reuses_compilation() {
        let extractor = PropertyExtractor::new();
        let a = extractor.pattern(ARRAY_VALUE).unwrap();
        let b = extractor.pattern(ARRAY_VALUE).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
