use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use bitvec::slice::BitSlice;
use bitvec::vec::BitVec;

use crate::code::{parse_bits, Code, CodeTable};
use crate::error::{Error, Result};
use crate::tree::Tree;

/// Codes of an encoded sequence, one per input symbol, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    codes: Vec<Code>,
}

impl Encoded {
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    /// number of encoded symbols
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// total number of bits of all codes
    pub fn bit_len(&self) -> usize {
        self.codes.iter().map(Code::len).sum()
    }

    /// all codes concatenated
    pub fn to_bits(&self) -> BitVec {
        let mut bits = BitVec::with_capacity(self.bit_len());
        for code in &self.codes {
            bits.extend_from_bitslice(code.bits());
        }
        bits
    }
}

impl Display for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for code in &self.codes {
            write!(f, "{}", code)?;
        }
        Ok(())
    }
}

/// Build a Huffman code for the characters of `text` and encode it.
///
/// Fails with [`Error::EmptyInput`] on an empty text.
pub fn encode(text: &str) -> Result<(Encoded, CodeTable<char>)> {
    let symbols: Vec<char> = text.chars().collect();
    encode_symbols(&symbols)
}

/// [`encode`] over any kind of symbol
pub fn encode_symbols<Symbol>(symbols: &[Symbol]) -> Result<(Encoded, CodeTable<Symbol>)>
where
    Symbol: Eq + Hash + Clone + Debug,
{
    let table = Tree::from_sequence(symbols.iter().cloned())?.codes();
    let encoded = encode_with(symbols, &table)?;
    Ok((encoded, table))
}

/// Encode `symbols` with an existing table.
///
/// Fails with [`Error::UnknownSymbol`] at the first symbol the table has no code for.
pub fn encode_with<'s, Symbol, I>(symbols: I, table: &CodeTable<Symbol>) -> Result<Encoded>
where
    Symbol: Eq + Hash + Clone + Debug + 's,
    I: IntoIterator<Item = &'s Symbol>,
{
    let mut codes = Vec::new();
    for (position, symbol) in symbols.into_iter().enumerate() {
        match table.get(symbol) {
            Some(code) => codes.push(code.clone()),
            None => {
                return Err(Error::UnknownSymbol {
                    symbol: format!("{:?}", symbol),
                    position,
                })
            }
        }
    }
    Ok(Encoded { codes })
}

/// Decodes `bits` by matching one code after another.
///
/// Fails with [`Error::MalformedEncoding`] when the bits run out in the middle
/// of a code, or when they outgrow the longest code without matching one.
pub fn decode<Symbol>(bits: &BitSlice, table: &CodeTable<Symbol>) -> Result<Vec<Symbol>>
where
    Symbol: Eq + Hash + Clone,
{
    let lookup: HashMap<&Code, &Symbol> =
        table.iter().map(|(symbol, code)| (code, symbol)).collect();
    let longest = table.max_code_length();
    let mut result = Vec::new();
    let mut current = Code::empty();
    let mut start = 0;
    for (position, bit) in bits.iter().by_vals().enumerate() {
        current.push(bit);
        if let Some(&symbol) = lookup.get(&current) {
            result.push(symbol.clone());
            current.clear();
            start = position + 1;
        } else if current.len() >= longest {
            return Err(Error::MalformedEncoding { position: start });
        }
    }
    if current.is_empty() {
        Ok(result)
    } else {
        Err(Error::MalformedEncoding { position: start })
    }
}

/// [`decode`] a string of `0`s and `1`s back into text
pub fn decode_str(bits: &str, table: &CodeTable<char>) -> Result<String> {
    let bits = parse_bits(bits)?;
    Ok(decode(&bits, table)?.into_iter().collect())
}
