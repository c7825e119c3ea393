//! Lexical helpers over raw formal definitions

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static GLOBAL_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[XCSADFPT]\d+").expect("global identifier pattern is valid"));

static RADICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"R\d+").expect("radical pattern is valid"));

/// Symbols that introduce new structure rather than substitute into an existing one.
const STRUCTURAL_SYMBOLS: [char; 7] = ['∀', '∃', '×', 'ℬ', ';', '|', ':'];

/// Pluggable source of referenced identifiers.
pub trait ReferenceExtractor {
    /// Referenced aliases in order of first appearance, without duplicates.
    fn references(&self, text: &str) -> Vec<String>;
}

/// Extracts global identifiers such as `X1` or `D12`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalIdentifiers;

impl ReferenceExtractor for GlobalIdentifiers {
    fn references(&self, text: &str) -> Vec<String> {
        extract_globals(text)
    }
}

/// Global identifiers referenced in `text`, deduplicated, in order of first appearance.
pub fn extract_globals(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    GLOBAL_IDENTIFIER
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|alias| seen.insert(*alias))
        .map(str::to_string)
        .collect()
}

/// A definition split into its argument-binding head and its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSplit<'a> {
    /// Text between the outer brackets, trimmed. Empty without a head.
    pub head: &'a str,
    /// Everything after the head, trimmed. The whole text without a head.
    pub body: &'a str,
}

/// Split `[α∈R1, β∈ℬ(X1)] body` into head and body.
///
/// The head must open the definition and is closed by the first bracket that
/// balances it. An unclosed head leaves the text as a body.
pub fn split_template(text: &str) -> TemplateSplit<'_> {
    let trimmed = text.trim();
    let no_head = TemplateSplit {
        head: "",
        body: trimmed,
    };
    if !trimmed.starts_with('[') {
        return no_head;
    }
    let mut depth = 0usize;
    for (position, symbol) in trimmed.char_indices() {
        match symbol {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return TemplateSplit {
                        head: trimmed[1..position].trim(),
                        body: trimmed[position + 1..].trim(),
                    };
                }
            }
            _ => {}
        }
    }
    no_head
}

/// A template binds arguments whose types are unbound radicals (`R1`, `R2`, ...).
pub fn is_template(text: &str) -> bool {
    let split = split_template(text);
    !split.head.is_empty() && RADICAL.is_match(split.head)
}

/// Pure expansion test: the body only substitutes into existing constructs.
pub fn is_simple_expression(body: &str) -> bool {
    !body.contains(STRUCTURAL_SYMBOLS)
}
