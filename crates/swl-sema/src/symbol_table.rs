//! Case value → action list mapping built by the analyzer.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Validated mapping from case value to the texts its `print`s emit.
///
/// Keys are unique. Iteration over the backing map is unordered; use
/// [`SymbolTable::entries`] for a sorted view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SymbolTable {
    cases: FxHashMap<i32, Vec<String>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` unless it is already present. Returns whether the
    /// entry was added; the first declaration of a value wins.
    pub fn insert(&mut self, value: i32, actions: Vec<String>) -> bool {
        if self.cases.contains_key(&value) {
            return false;
        }
        self.cases.insert(value, actions);
        true
    }

    pub fn lookup(&self, value: i32) -> Option<&[String]> {
        self.cases.get(&value).map(Vec::as_slice)
    }

    pub fn contains(&self, value: i32) -> bool {
        self.cases.contains_key(&value)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Entries sorted by case value.
    pub fn entries(&self) -> Vec<(i32, &[String])> {
        let mut entries: Vec<_> = self
            .cases
            .iter()
            .map(|(value, actions)| (*value, actions.as_slice()))
            .collect();
        entries.sort_unstable_by_key(|(value, _)| *value);
        entries
    }

    /// One line per entry, sorted: `case 1: print("a") print("b")`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (value, actions) in self.entries() {
            out.push_str(&format!("case {}:", value));
            for action in actions {
                out.push_str(&format!(" print(\"{}\")", action));
            }
            out.push('\n');
        }
        out
    }
}
