use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("symbol {name} is already defined (first defined on line {first_line})")]
pub struct DuplicateSymbol {
    pub name: String,
    pub first_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub name: String,
    pub address: usize,
    pub defined: bool,
    /// Line of definition, or of first sighting while still undefined.
    pub line_no: usize,
}

/// Label bindings collected over one pass. Entries keep their insertion
/// order so listings and diagnostics come out in source order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    symbols: IndexMap<String, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `address`. Completing a forward reference is fine;
    /// redefining an already defined symbol is rejected and leaves the
    /// table untouched.
    pub fn define(
        &mut self,
        name: &str,
        address: usize,
        line_no: usize,
    ) -> Result<(), DuplicateSymbol> {
        if let Some(entry) = self.symbols.get_mut(name) {
            if entry.defined {
                return Err(DuplicateSymbol {
                    name: name.to_owned(),
                    first_line: entry.line_no,
                });
            }
            entry.address = address;
            entry.defined = true;
            entry.line_no = line_no;
            return Ok(());
        }

        self.symbols.insert(
            name.to_owned(),
            SymbolEntry {
                name: name.to_owned(),
                address,
                defined: true,
                line_no,
            },
        );

        Ok(())
    }

    /// Record a symbol sighted in operand position. Bookkeeping only;
    /// resolution is a second-pass concern.
    pub fn reference(&mut self, name: &str, line_no: usize) {
        self.symbols
            .entry(name.to_owned())
            .or_insert_with(|| SymbolEntry {
                name: name.to_owned(),
                address: 0,
                defined: false,
                line_no,
            });
    }

    /// Address of a defined symbol.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.symbols
            .get(name)
            .filter(|entry| entry.defined)
            .map(|entry| entry.address)
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.symbols.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.symbols.values()
    }

    /// Symbols referenced during the pass but never defined.
    pub fn undefined(&self) -> impl Iterator<Item = &SymbolEntry> {
        self.symbols.values().filter(|entry| !entry.defined)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
