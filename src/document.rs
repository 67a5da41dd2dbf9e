use std::fmt;

use crate::ast::arena::Arena;
use crate::ast::Tag;
use crate::value::Value;

/// A successfully parsed JSON document.
///
/// The document owns both the input buffer (mutated during the parse:
/// string payloads are compacted in place and closing quotes overwritten
/// with NUL) and the arena holding the AST. Every [`Value`], string slice,
/// and key borrowed from the document points into these two buffers, so
/// they live exactly as long as the document.
pub struct Document {
    input: Box<[u8]>,
    words: Box<[usize]>,
    root_offset: usize,
    root_tag: Tag,
    key_sort_threshold: Option<usize>,
}

impl Document {
    pub(crate) fn new(
        input: Vec<u8>,
        arena: Arena,
        root_tag: Tag,
        key_sort_threshold: Option<usize>,
    ) -> Self {
        let (words, root_offset) = arena.into_words();
        Self {
            input: input.into_boxed_slice(),
            words: words.into_boxed_slice(),
            root_offset,
            root_tag,
            key_sort_threshold,
        }
    }

    /// The root value; always an array or an object.
    pub fn root(&self) -> Value<'_> {
        Value::new(self.root_tag, self.root_offset, self)
    }

    pub(crate) fn input(&self) -> &[u8] {
        &self.input
    }

    pub(crate) fn words(&self) -> &[usize] {
        &self.words
    }

    pub(crate) fn key_sort_threshold(&self) -> Option<usize> {
        self.key_sort_threshold
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root().kind())
            .field("input_bytes", &self.input.len())
            .field("ast_words", &(self.words.len() - self.root_offset))
            .finish()
    }
}
