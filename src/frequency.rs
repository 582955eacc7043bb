use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Error, Result};

/// Occurrence count of every distinct symbol of a sequence.
///
/// Entries keep the order in which their symbols first occurred; the tree
/// builder seeds its leaves in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<Symbol: Eq + Hash> {
    entries: Vec<(Symbol, usize)>,
    index: HashMap<Symbol, usize>,
}

impl<Symbol> FrequencyTable<Symbol>
where
    Symbol: Eq + Hash + Clone,
{
    /// count occurrences of each symbol, fails on an empty sequence
    pub fn from_sequence<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = Symbol>,
    {
        let table = Self::count(symbols);
        if table.is_empty() {
            Err(Error::EmptyInput)
        } else {
            Ok(table)
        }
    }

    /// count occurrences of each symbol, an empty sequence gives an empty table
    pub fn count<I>(symbols: I) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut table = FrequencyTable {
            entries: Vec::new(),
            index: HashMap::new(),
        };
        for symbol in symbols {
            table.add(symbol, 1);
        }
        table
    }

    fn add(&mut self, symbol: Symbol, occurrences: usize) {
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 += occurrences,
            None => {
                self.index.insert(symbol.clone(), self.entries.len());
                self.entries.push((symbol, occurrences));
            }
        }
    }

    /// Sums the counts of `other` into this table.
    ///
    /// Used to combine tables counted over separate shards of one input.
    /// Symbols unknown to `self` are appended in `other`'s order.
    pub fn merge(&mut self, other: FrequencyTable<Symbol>) {
        for (symbol, occurrences) in other.entries {
            self.add(symbol, occurrences);
        }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<usize> {
        self.index.get(symbol).map(|&i| self.entries[i].1)
    }

    /// number of distinct symbols
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// sum of all counts, equal to the length of the counted sequence
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// symbols and their counts in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, usize)> {
        self.entries.iter().map(|(symbol, n)| (symbol, *n))
    }
}

impl<Symbol> IntoIterator for FrequencyTable<Symbol>
where
    Symbol: Eq + Hash,
{
    type Item = (Symbol, usize);
    type IntoIter = std::vec::IntoIter<(Symbol, usize)>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
