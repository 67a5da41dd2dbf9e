//! Single-pass JSON parser with a flat, single-allocation AST.
//!
//! The parser consumes a mutable byte buffer and produces a [`Document`]
//! whose AST is one dense array of tagged machine words; navigation is
//! index arithmetic, never pointer chasing. String payloads are decoded in
//! place inside the input buffer, so no string is ever copied. Working
//! memory is a single arena of one word per input byte, allocated up
//! front.
//!
//! # Examples
//!
//! ```rust
//! let doc = flatjson::parse_str(r#"{"name":"Ada","tags":[1,2.5,true]}"#)?;
//! let root = doc.root().as_object().unwrap();
//! assert_eq!(root.get("name").unwrap().as_str(), Some("Ada"));
//!
//! let tags = root.get("tags").unwrap().as_array().unwrap();
//! assert_eq!(tags.len(), 3);
//! assert_eq!(tags.get(0).unwrap().as_integer(), Some(1));
//! assert_eq!(tags.get(1).unwrap().as_double(), Some(2.5));
//! # Ok::<(), flatjson::Error>(())
//! ```
//!
//! Failures carry a kind and a one-based location:
//!
//! ```rust
//! let err = flatjson::parse_str("[1,]").unwrap_err();
//! assert_eq!(err.kind(), flatjson::ErrorKind::ExpectedValue);
//! assert_eq!((err.line(), err.column()), (1, 4));
//! ```

mod ast;
mod classify;
mod convert;
mod document;
mod error;
mod options;
mod parse;
mod value;

pub use document::Document;
pub use error::{Error, ErrorKind, Location};
pub use options::{ParseOptions, DEFAULT_KEY_SORT_THRESHOLD};
pub use value::{ArrayIter, ArrayView, Kind, ObjectIter, ObjectView, Value};

use ast::arena::Arena;

pub type Result<T> = std::result::Result<T, Error>;

/// Offsets in the AST share a machine word with a 3-bit tag; longer inputs
/// cannot be addressed and are rejected up front.
const MAX_INPUT_BYTES: usize = usize::MAX >> 3;

/// Parses `input`, taking ownership of the buffer.
///
/// The buffer is mutated during the parse and retained by the returned
/// document; string values alias into it. The arena is sized at one word
/// per input byte, the worst case, so the parse itself cannot run out of
/// room.
pub fn parse(input: Vec<u8>) -> Result<Document> {
    parse_with_options(input, &ParseOptions::default())
}

pub fn parse_with_options(input: Vec<u8>, options: &ParseOptions) -> Result<Document> {
    if input.len() > MAX_INPUT_BYTES {
        return Err(input_too_large());
    }
    let arena = Arena::new(input.len());
    parse::parse_document(input, arena, options)
}

/// Parses `input` into a caller-provided word buffer, the zero-allocation
/// variant. `words` must hold at least one word per input byte; only that
/// prefix is used. A too-small buffer fails with
/// [`ErrorKind::OutOfMemory`] at line 1, column 1.
pub fn parse_with_buffer(
    input: Vec<u8>,
    words: Vec<usize>,
    options: &ParseOptions,
) -> Result<Document> {
    if input.len() > MAX_INPUT_BYTES {
        return Err(input_too_large());
    }
    let arena = Arena::from_buffer(words, input.len()).ok_or_else(input_too_large)?;
    parse::parse_document(input, arena, options)
}

/// Copying convenience over [`parse`].
pub fn parse_str(input: &str) -> Result<Document> {
    parse(input.as_bytes().to_vec())
}

/// Copying convenience over [`parse`].
pub fn parse_slice(input: &[u8]) -> Result<Document> {
    parse(input.to_vec())
}

/// Parses many independent documents in parallel. Each buffer is owned by
/// its resulting document, exactly as with [`parse`].
#[cfg(feature = "parallel")]
pub fn parse_many(inputs: Vec<Vec<u8>>, options: &ParseOptions) -> Vec<Result<Document>> {
    use rayon::prelude::*;

    inputs
        .into_par_iter()
        .map(|input| parse_with_options(input, options))
        .collect()
}

fn input_too_large() -> Error {
    Error::new(
        ErrorKind::OutOfMemory,
        Location { line: 1, column: 1 },
    )
}
