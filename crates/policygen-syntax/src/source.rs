//! TypeScript parsing.
//!
//! A [`ParsedSource`] keeps the tree together with the text it was parsed
//! from, so query captures can be turned back into source text.

use crate::SyntaxError;
use tree_sitter::{Language, Node, Parser, Tree};

/// The grammar every [`Pattern`](crate::Pattern) compiles against.
pub fn typescript() -> Language {
    arborium_typescript::language().into()
}

/// A parsed TypeScript file.
pub struct ParsedSource {
    text: String,
    tree: Tree,
}

/// Parse TypeScript source text.
///
/// Syntax errors do not fail the parse: tree-sitter recovers and the
/// malformed region simply fails to match any pattern.
pub fn parse_typescript(text: impl Into<String>) -> Result<ParsedSource, SyntaxError> {
    let text = text.into();
    let mut parser = Parser::new();
    parser
        .set_language(&typescript())
        .map_err(|e| SyntaxError::Grammar(e.to_string()))?;

    let tree = parser.parse(&text, None).ok_or(SyntaxError::Parse)?;
    if tree.root_node().has_error() {
        tracing::debug!("TypeScript source contains syntax errors");
    }

    Ok(ParsedSource { text, tree })
}

impl ParsedSource {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.text.as_bytes()).unwrap_or("")
    }
}

/// Decode a `string` node into its value, without quotes and with escape
/// sequences resolved.
pub fn string_literal(node: Node, source: &str) -> String {
    let mut value = String::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let text = child.utf8_text(source.as_bytes()).unwrap_or("");
        match child.kind() {
            "string_fragment" => value.push_str(text),
            "escape_sequence" => value.push_str(&decode_escape(text)),
            _ => {}
        }
    }
    value
}

fn decode_escape(sequence: &str) -> String {
    let body = sequence.strip_prefix('\\').unwrap_or(sequence);
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let decoded = match first {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        'v' => '\u{b}',
        '0' if body.len() == 1 => '\0',
        // Line continuation
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => return String::new(),
        'x' | 'u' => {
            let hex = chars.as_str().trim_start_matches('{').trim_end_matches('}');
            return u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| sequence.to_string());
        }
        other => other,
    };
    decoded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_string(source: &ParsedSource) -> Node<'_> {
        fn find(node: Node) -> Option<Node> {
            if node.kind() == "string" {
                return Some(node);
            }
            let mut cursor = node.walk();
            node.children(&mut cursor).find_map(find)
        }
        find(source.root()).expect("no string literal in source")
    }

    #[test]
    fn test_plain_literal() {
        let source = parse_typescript(r#"const a = "hello world";"#).unwrap();
        let node = first_string(&source);
        assert_eq!(string_literal(node, source.text()), "hello world");
    }

    #[test]
    fn test_single_quoted_with_escapes() {
        let source = parse_typescript(r#"const a = 'it\'s\ta A\x42\u{43}';"#).unwrap();
        let node = first_string(&source);
        assert_eq!(string_literal(node, source.text()), "it's\ta ABC");
    }

    #[test]
    fn test_empty_literal() {
        let source = parse_typescript("const a = '';").unwrap();
        let node = first_string(&source);
        assert_eq!(string_literal(node, source.text()), "");
    }

    #[test]
    fn test_decode_escape() {
        assert_eq!(decode_escape("\\n"), "\n");
        assert_eq!(decode_escape("\\\\"), "\\");
        assert_eq!(decode_escape("\\\""), "\"");
        assert_eq!(decode_escape("\\0"), "\0");
        assert_eq!(decode_escape("\\u{1F600}"), "\u{1F600}");
        // Lone surrogates are kept verbatim
        assert_eq!(decode_escape("\\uD83D"), "\\uD83D");
    }

    #[test]
    fn test_node_text() {
        let source = parse_typescript("let answer = 42;").unwrap();
        assert_eq!(source.node_text(source.root()), "let answer = 42;");
    }
}
