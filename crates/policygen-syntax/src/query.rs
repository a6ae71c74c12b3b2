//! Pattern matching over syntax trees.
//!
//! Patterns are tree-sitter S-expressions with named captures and `#eq?`
//! text predicates, e.g. `((pair key: (property_identifier) @k) (#eq? @k "type"))`.

use crate::SyntaxError;
use crate::source::typescript;
use std::collections::HashSet;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

/// A compiled structural pattern.
pub struct Pattern {
    query: Query,
}

/// A single named capture within a match.
#[derive(Debug, Clone)]
struct Capture<'tree> {
    name: String,
    node: Node<'tree>,
}

/// One match of a pattern: capture names mapped to syntax nodes.
#[derive(Debug, Clone)]
pub struct MatchRecord<'tree> {
    captures: Vec<Capture<'tree>>,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, SyntaxError> {
        let query = Query::new(&typescript(), source).map_err(|e| SyntaxError::Query {
            message: e.to_string(),
            query: source.to_string(),
        })?;
        Ok(Self { query })
    }

    /// Run the pattern against `node` and everything beneath it.
    ///
    /// Records come back in source order. Two matches binding the same
    /// captures to the same nodes are reported once.
    pub fn matches<'tree>(&self, node: Node<'tree>, text: &str) -> Vec<MatchRecord<'tree>> {
        let names = self.query.capture_names();
        let mut cursor = QueryCursor::new();
        let mut iter = cursor.matches(&self.query, node, text.as_bytes());

        let mut seen: HashSet<Vec<(u32, usize)>> = HashSet::new();
        let mut records = Vec::new();
        while let Some(m) = iter.next() {
            let mut identity: Vec<(u32, usize)> =
                m.captures.iter().map(|c| (c.index, c.node.id())).collect();
            identity.sort_unstable();
            if !seen.insert(identity) {
                continue;
            }

            let captures = m
                .captures
                .iter()
                .map(|c| Capture {
                    name: names[c.index as usize].to_string(),
                    node: c.node,
                })
                .collect();
            records.push(MatchRecord { captures });
        }

        records.sort_by_key(MatchRecord::position);
        records
    }
}

impl<'tree> MatchRecord<'tree> {
    /// First node bound to `name`.
    pub fn get(&self, name: &str) -> Option<Node<'tree>> {
        self.captures
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.node)
    }

    pub fn text<'s>(&self, name: &str, text: &'s str) -> Option<&'s str> {
        self.get(name)
            .and_then(|node| node.utf8_text(text.as_bytes()).ok())
    }

    fn position(&self) -> usize {
        self.captures
            .iter()
            .map(|c| c.node.start_byte())
            .min()
            .unwrap_or(0)
    }
}
