use std::io;

/// Everything that can go wrong while building, applying or reading a Huffman code.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// there are no symbols to build a code from
    #[error("no input to encode")]
    EmptyInput,

    /// the code table has no entry for a symbol of the input
    #[error("symbol {symbol} at position {position} has no code")]
    UnknownSymbol { symbol: String, position: usize },

    /// bit string ends in the middle of a code, or matches no code at all
    #[error("malformed encoding: no code matches the bits starting at {position}")]
    MalformedEncoding { position: usize },

    /// there is something other than 0s and 1s in a code string
    #[error("non-binary character {found:?} at position {position}")]
    NonBinary { position: usize, found: char },

    /// something is wrong with a "symbol TAB code" definition
    #[error("invalid codebook at line {line}: {reason}")]
    InvalidCodebook { line: usize, reason: CodebookError },

    /// just relaying io::Error
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Why a codebook line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodebookError {
    /// definition is not in "symbol TAB code" style
    #[error("definition is not a tab separated symbol and code")]
    MisformattedDefinition,

    /// symbol part is not exactly one (possibly escaped) character
    #[error("symbol is not a single character")]
    InvalidSymbol,

    /// code part has something wrong
    #[error("code is empty or not binary")]
    InvalidCode,

    /// same symbol has been given two codes
    #[error("symbol is defined twice")]
    DuplicateDefinitions,

    /// same code has been given to another symbol
    #[error("code is already used by another symbol")]
    DuplicateEncodings,

    /// a code is the prefix of another one
    #[error("code set is not prefix-free")]
    NotPrefixFree,

    /// no definitions at all
    #[error("no definitions")]
    Empty,
}

pub type Result<T> = std::result::Result<T, Error>;
