//! Huffman coding of text, one character per symbol.
//!
//! The pipeline runs strictly forward: text, [`FrequencyTable`], [`Tree`],
//! [`CodeTable`], [`Encoded`].
//!
//! ```
//! let (encoded, table) = huffman_coder::encode("aabbbcc")?;
//! assert_eq!(table.get(&'b').map(|code| code.len()), Some(1));
//! assert_eq!(huffman_coder::decode_str(&encoded.to_string(), &table)?, "aabbbcc");
//! # Ok::<(), huffman_coder::Error>(())
//! ```

pub mod code;
pub mod coder;
pub mod error;
pub mod frequency;
pub mod tree;

pub use code::{Code, CodeTable};
pub use coder::{decode, decode_str, encode, encode_symbols, encode_with, Encoded};
pub use error::{CodebookError, Error, Result};
pub use frequency::FrequencyTable;
pub use tree::{Node, NodeId, Tree};
