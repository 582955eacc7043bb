use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use bitvec::slice::BitSlice;
use bitvec::vec::BitVec;

use crate::error::{CodebookError, Error, Result};
use crate::frequency::FrequencyTable;

/// A code word, bits in the order they are emitted. Never empty outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(BitVec);

impl Code {
    /// `None` for an empty slice
    pub fn from_bits(bits: &[bool]) -> Option<Self> {
        if bits.is_empty() {
            None
        } else {
            Some(Code(bits.iter().copied().collect()))
        }
    }

    /// prefix under construction, only complete codes leave the crate
    pub(crate) fn empty() -> Self {
        Code(BitVec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bits(&self) -> &BitSlice {
        &self.0
    }

    pub(crate) fn push(&mut self, bit: bool) {
        self.0.push(bit);
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    /// true if `other` starts with all the bits of `self`
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len() <= other.len() && other.0[..self.len()] == self.0[..]
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in self.0.iter().by_vals() {
            write!(f, "{}", if bit { 1 } else { 0 })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCodeError {
    #[error("empty code")]
    Empty,
    #[error("non-binary character {found:?} at position {position}")]
    NonBinary { position: usize, found: char },
}

impl FromStr for Code {
    type Err = ParseCodeError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseCodeError::Empty);
        }
        let mut code = Code::empty();
        for (position, found) in s.chars().enumerate() {
            match found {
                '0' => code.push(false),
                '1' => code.push(true),
                _ => return Err(ParseCodeError::NonBinary { position, found }),
            }
        }
        Ok(code)
    }
}

/// Parse a string of `0`s and `1`s into bits, skipping ASCII whitespace.
pub fn parse_bits(s: &str) -> Result<BitVec> {
    let mut bits = BitVec::with_capacity(s.len());
    for (position, found) in s.chars().enumerate() {
        match found {
            '0' => bits.push(false),
            '1' => bits.push(true),
            c if c.is_ascii_whitespace() => (),
            _ => return Err(Error::NonBinary { position, found }),
        }
    }
    Ok(bits)
}

/// Code of every symbol, in the order the symbols first occurred.
///
/// Tables from outside the crate go through [`CodeTable::new`] or
/// [`CodeTable::parse_codebook`], so every table holds non-empty,
/// distinct, prefix-free codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<Symbol: Eq + Hash> {
    entries: Vec<(Symbol, Code)>,
    index: HashMap<Symbol, usize>,
}

impl<Symbol> CodeTable<Symbol>
where
    Symbol: Eq + Hash + Clone,
{
    /// Builds a table from symbol and code pairs.
    ///
    /// Rejects an empty table, empty codes, symbols or codes given twice and
    /// code sets that are not prefix-free. The `line` of the error counts
    /// entries from 1.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Symbol, Code)>,
    {
        let mut builder = TableBuilder::default();
        for (i, (symbol, code)) in entries.into_iter().enumerate() {
            builder.insert(i + 1, symbol, code)?;
        }
        builder.finish()
    }

    /// Tree paths are distinct and non-empty by construction, no checks needed.
    pub(crate) fn from_tree_paths(paths: Vec<(Symbol, Code)>) -> Self {
        let index = paths
            .iter()
            .enumerate()
            .map(|(i, (symbol, _))| (symbol.clone(), i))
            .collect();
        CodeTable {
            entries: paths,
            index,
        }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Code> {
        self.index.get(symbol).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Code)> {
        self.entries.iter().map(|(symbol, code)| (symbol, code))
    }

    pub fn max_code_length(&self) -> usize {
        self.entries.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// No code is the prefix of another.
    ///
    /// After sorting lexicographically a prefix sits right before the codes
    /// extending it, so only neighbours need comparing.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Code> = self.entries.iter().map(|(_, code)| code).collect();
        codes.sort_by(|a, b| a.0.iter().by_vals().cmp(b.0.iter().by_vals()));
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }

    /// total bits needed to encode a text with the given symbol counts
    pub fn weighted_length(&self, frequencies: &FrequencyTable<Symbol>) -> Option<usize> {
        frequencies
            .iter()
            .map(|(symbol, n)| self.get(symbol).map(|code| code.len() * n))
            .sum()
    }

    /// bits a fixed-width code over the same symbols needs for `symbols` symbols
    pub fn fixed_width_length(&self, symbols: usize) -> usize {
        let width = (usize::BITS - self.len().saturating_sub(1).leading_zeros()).max(1);
        width as usize * symbols
    }
}

/// collects definitions one at a time, checking each as it comes
struct TableBuilder<Symbol: Eq + Hash> {
    table: CodeTable<Symbol>,
    seen_codes: HashSet<Code>,
}

impl<Symbol: Eq + Hash> Default for TableBuilder<Symbol> {
    fn default() -> Self {
        TableBuilder {
            table: CodeTable {
                entries: Vec::new(),
                index: HashMap::new(),
            },
            seen_codes: HashSet::new(),
        }
    }
}

impl<Symbol> TableBuilder<Symbol>
where
    Symbol: Eq + Hash + Clone,
{
    fn insert(&mut self, line: usize, symbol: Symbol, code: Code) -> Result<()> {
        let invalid = |reason| Err(Error::InvalidCodebook { line, reason });
        if code.is_empty() {
            return invalid(CodebookError::InvalidCode);
        }
        if self.table.index.contains_key(&symbol) {
            return invalid(CodebookError::DuplicateDefinitions);
        }
        if !self.seen_codes.insert(code.clone()) {
            return invalid(CodebookError::DuplicateEncodings);
        }
        self.table.index.insert(symbol.clone(), self.table.entries.len());
        self.table.entries.push((symbol, code));
        Ok(())
    }

    fn finish(self) -> Result<CodeTable<Symbol>> {
        let invalid = |reason| Err(Error::InvalidCodebook { line: 0, reason });
        if self.table.is_empty() {
            return invalid(CodebookError::Empty);
        }
        if !self.table.is_prefix_free() {
            return invalid(CodebookError::NotPrefixFree);
        }
        Ok(self.table)
    }
}

impl CodeTable<char> {
    /// Format the table with each symbol and corresponding code.
    /// Each symbol-code relation is newline separated,
    /// and is represented by a tab separated pair of escaped symbol and code.
    pub fn format_codebook(&self) -> String {
        self.entries
            .iter()
            .map(|(symbol, code)| format!("{}\t{}", symbol.escape_debug(), code))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Reads back what [`CodeTable::format_codebook`] wrote.
    ///
    /// Lines are numbered from 1. Besides malformed lines, everything
    /// [`CodeTable::new`] rejects is rejected.
    pub fn parse_codebook(codebook: &str) -> Result<Self> {
        let mut builder = TableBuilder::default();
        for (i, line) in codebook.lines().enumerate() {
            let invalid = |reason| Error::InvalidCodebook { line: i + 1, reason };
            let (symbol, code) = line
                .split_once('\t')
                .ok_or_else(|| invalid(CodebookError::MisformattedDefinition))?;
            let symbol =
                unescape_symbol(symbol).ok_or_else(|| invalid(CodebookError::InvalidSymbol))?;
            let code: Code = code
                .parse()
                .map_err(|_| invalid(CodebookError::InvalidCode))?;
            builder.insert(i + 1, symbol, code)?;
        }
        builder.finish()
    }
}

/// inverse of `char::escape_debug` for a single character
fn unescape_symbol(field: &str) -> Option<char> {
    let mut chars = field.chars();
    let first = chars.next()?;
    let symbol = if first != '\\' {
        first
    } else {
        match chars.next()? {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            '0' => '\0',
            c @ ('\\' | '\'' | '"') => c,
            'u' => {
                let hex = chars.as_str().strip_prefix('{')?.strip_suffix('}')?;
                return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
            }
            _ => return None,
        }
    };
    match chars.next() {
        None => Some(symbol),
        Some(_) => None,
    }
}
