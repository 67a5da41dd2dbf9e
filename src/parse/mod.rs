//! The structural state machine.
//!
//! Grammar recognition is an explicit state enum driven by a dispatch loop.
//! Each open structure keeps a sentinel word at the bottom of its scratch
//! frame holding the parent's frame base (or the root marker), so closing a
//! structure restores the parent frame without a separate stack.

mod install;
pub(crate) mod numbers;
pub(crate) mod strings;

use memchr::memchr2_iter;

use crate::ast::arena::Arena;
use crate::ast::{
    element_tag, element_value, make_element, Tag, DOUBLE_WORDS, INTEGER_WORDS, ROOT_MARKER,
};
use crate::classify::is_whitespace;
use crate::document::Document;
use crate::error::{Error, ErrorKind, Location};
use crate::options::ParseOptions;
use crate::{ast, Result};

/// A failure at a byte offset; the offset becomes a line/column pair once
/// the parse unwinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fail {
    pub kind: ErrorKind,
    pub at: usize,
}

impl Fail {
    pub(crate) fn new(kind: ErrorKind, at: usize) -> Self {
        Self { kind, at }
    }

    fn into_error(self, input: &[u8]) -> Error {
        Error::new(self.kind, location_of(input, self.at))
    }
}

/// One-based line and column of byte offset `at`, counting `\r`, `\n`, and
/// `\r\n` each as a single line break. Columns count bytes.
pub(crate) fn location_of(input: &[u8], at: usize) -> Location {
    let at = at.min(input.len());
    let mut line = 1;
    let mut line_start = 0;
    let mut last_cr = usize::MAX;
    for pos in memchr2_iter(b'\r', b'\n', &input[..at]) {
        if input[pos] == b'\n' && last_cr == pos.wrapping_sub(1) {
            // Second half of a "\r\n" pair, already counted.
            line_start = pos + 1;
            continue;
        }
        if input[pos] == b'\r' {
            last_cr = pos;
        }
        line += 1;
        line_start = pos + 1;
    }
    Location {
        line,
        column: at - line_start + 1,
    }
}

/// Runs the parser over `input`, installing the AST into `arena`, and wraps
/// the outcome into a [`Document`].
pub(crate) fn parse_document(
    mut input: Vec<u8>,
    arena: Arena,
    options: &ParseOptions,
) -> Result<Document> {
    let outcome = Parser {
        input: &mut input,
        arena,
        key_sort_threshold: options.key_sort_threshold,
    }
    .run();
    match outcome {
        Ok((root_tag, arena)) => Ok(Document::new(
            input,
            arena,
            root_tag,
            options.key_sort_threshold,
        )),
        Err(fail) => Err(fail.into_error(&input)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ArrayCloseOrElement,
    ObjectCloseOrElement,
    ObjectKey,
    NextElement,
    StructureCloseOrComma,
    PopArray,
    PopObject,
}

struct Parser<'a> {
    input: &'a mut [u8],
    arena: Arena,
    key_sort_threshold: Option<usize>,
}

impl<'a> Parser<'a> {
    fn run(mut self) -> std::result::Result<(Tag, Arena), Fail> {
        let mut p = self
            .skip_whitespace(0)
            .ok_or(Fail::new(ErrorKind::MissingRootElement, self.input.len()))?;

        let mut structure_tag = match self.input[p] {
            b'[' => Tag::Array,
            b'{' => Tag::Object,
            _ => return Err(Fail::new(ErrorKind::BadRoot, p)),
        };
        let mut current_base = self.arena.scratch_len();
        self.push_scratch(make_element(structure_tag, ROOT_MARKER), p)?;
        let mut state = match structure_tag {
            Tag::Array => State::ArrayCloseOrElement,
            _ => State::ObjectCloseOrElement,
        };

        loop {
            match state {
                State::ArrayCloseOrElement => {
                    p = self
                        .skip_whitespace(p + 1)
                        .ok_or_else(|| self.unexpected_end())?;
                    state = if self.input[p] == b']' {
                        State::PopArray
                    } else {
                        State::NextElement
                    };
                }

                State::ObjectCloseOrElement => {
                    p = self
                        .skip_whitespace(p + 1)
                        .ok_or_else(|| self.unexpected_end())?;
                    state = if self.input[p] == b'}' {
                        State::PopObject
                    } else {
                        State::ObjectKey
                    };
                }

                State::StructureCloseOrComma => {
                    p = self
                        .skip_whitespace(p)
                        .ok_or_else(|| self.unexpected_end())?;
                    let byte = self.input[p];
                    if structure_tag == Tag::Array {
                        if byte == b']' {
                            state = State::PopArray;
                        } else if byte == b',' {
                            p += 1;
                            state = State::NextElement;
                        } else {
                            return Err(Fail::new(ErrorKind::ExpectedComma, p));
                        }
                    } else if byte == b'}' {
                        state = State::PopObject;
                    } else if byte == b',' {
                        p += 1;
                        state = State::ObjectKey;
                    } else {
                        return Err(Fail::new(ErrorKind::ExpectedComma, p));
                    }
                }

                State::ObjectKey => {
                    p = self
                        .skip_whitespace(p)
                        .ok_or_else(|| self.unexpected_end())?;
                    if self.input[p] != b'"' {
                        return Err(Fail::new(ErrorKind::MissingObjectKey, p));
                    }
                    let slot = self.reserve_scratch(2, p)?;
                    let (next, span) = strings::decode_string(self.input, p)?;
                    self.arena.set_word(slot, span.0);
                    self.arena.set_word(slot + 1, span.1);
                    match self.skip_whitespace(next) {
                        Some(q) if self.input[q] == b':' => p = q + 1,
                        Some(q) => return Err(Fail::new(ErrorKind::ExpectedColon, q)),
                        None => {
                            return Err(Fail::new(ErrorKind::ExpectedColon, self.input.len()))
                        }
                    }
                    state = State::NextElement;
                }

                State::NextElement => {
                    p = self
                        .skip_whitespace(p)
                        .ok_or_else(|| self.unexpected_end())?;
                    let value_tag = match self.input[p] {
                        0 => return Err(Fail::new(ErrorKind::UnexpectedEnd, p)),
                        b'n' => {
                            p = self.expect_literal(p, b"null", ErrorKind::ExpectedNull)?;
                            Tag::Null
                        }
                        b'f' => {
                            p = self.expect_literal(p, b"false", ErrorKind::ExpectedFalse)?;
                            Tag::False
                        }
                        b't' => {
                            p = self.expect_literal(p, b"true", ErrorKind::ExpectedTrue)?;
                            Tag::True
                        }
                        b'0'..=b'9' | b'-' => {
                            let (next, number) = numbers::parse_number(self.input, p)?;
                            p = next;
                            self.store_number(number, p)?
                        }
                        b'"' => {
                            let slot = self.reserve_ast(2, p)?;
                            let (next, span) = strings::decode_string(self.input, p)?;
                            self.arena.set_word(slot, span.0);
                            self.arena.set_word(slot + 1, span.1);
                            p = next;
                            Tag::String
                        }
                        open @ (b'[' | b'{') => {
                            let previous_base = current_base;
                            current_base = self.arena.scratch_len();
                            self.push_scratch(make_element(structure_tag, previous_base), p)?;
                            if open == b'[' {
                                structure_tag = Tag::Array;
                                state = State::ArrayCloseOrElement;
                            } else {
                                structure_tag = Tag::Object;
                                state = State::ObjectCloseOrElement;
                            }
                            continue;
                        }
                        b',' => return Err(Fail::new(ErrorKind::UnexpectedComma, p)),
                        _ => return Err(Fail::new(ErrorKind::ExpectedValue, p)),
                    };
                    self.push_scratch(make_element(value_tag, self.arena.write_offset()), p)?;
                    state = State::StructureCloseOrComma;
                }

                State::PopArray | State::PopObject => {
                    p += 1;
                    let frame_start = current_base + 1;
                    let frame_end = self.arena.scratch_len();
                    let sentinel = self.arena.word(current_base);
                    // Pop the frame before installing: the record is allowed
                    // to overlay the dead frame's cells, which is what keeps
                    // the one-word-per-input-byte bound tight.
                    self.arena.reset_scratch(current_base);
                    let installed = if state == State::PopArray {
                        install::install_array(&mut self.arena, frame_start, frame_end)
                    } else {
                        install::install_object(
                            &mut self.arena,
                            frame_start,
                            frame_end,
                            self.input,
                            self.key_sort_threshold,
                        )
                    };
                    installed.map_err(|_| Fail::new(ErrorKind::OutOfMemory, p))?;

                    let parent = element_value(sentinel);
                    if parent == ROOT_MARKER {
                        return match self.skip_whitespace(p) {
                            Some(q) => Err(Fail::new(ErrorKind::ExpectedEndOfInput, q)),
                            None => Ok((structure_tag, self.arena)),
                        };
                    }
                    let finished_tag = structure_tag;
                    structure_tag = element_tag(sentinel);
                    current_base = parent;
                    self.push_scratch(
                        make_element(finished_tag, self.arena.write_offset()),
                        p,
                    )?;
                    state = State::StructureCloseOrComma;
                }
            }
        }
    }

    fn skip_whitespace(&self, mut p: usize) -> Option<usize> {
        while p < self.input.len() {
            if !is_whitespace(self.input[p]) {
                return Some(p);
            }
            p += 1;
        }
        None
    }

    fn expect_literal(
        &self,
        p: usize,
        literal: &[u8],
        mismatch: ErrorKind,
    ) -> std::result::Result<usize, Fail> {
        if self.input.len() - p < literal.len() {
            return Err(Fail::new(ErrorKind::UnexpectedEnd, p));
        }
        if &self.input[p..p + literal.len()] != literal {
            return Err(Fail::new(mismatch, p));
        }
        Ok(p + literal.len())
    }

    fn store_number(&mut self, number: numbers::Number, p: usize) -> std::result::Result<Tag, Fail> {
        match number {
            numbers::Number::Integer(value) => {
                let at = self.reserve_ast(INTEGER_WORDS, p)?;
                ast::store_integer(self.arena.raw_mut(), at, value);
                Ok(Tag::Integer)
            }
            numbers::Number::Double(value) => {
                let at = self.reserve_ast(DOUBLE_WORDS, p)?;
                ast::store_double(self.arena.raw_mut(), at, value);
                Ok(Tag::Double)
            }
        }
    }

    fn unexpected_end(&self) -> Fail {
        Fail::new(ErrorKind::UnexpectedEnd, self.input.len())
    }

    fn push_scratch(&mut self, word: usize, p: usize) -> std::result::Result<(), Fail> {
        self.arena
            .push_scratch(word)
            .map_err(|_| Fail::new(ErrorKind::OutOfMemory, p))
    }

    fn reserve_scratch(&mut self, count: usize, p: usize) -> std::result::Result<usize, Fail> {
        self.arena
            .reserve_scratch(count)
            .map_err(|_| Fail::new(ErrorKind::OutOfMemory, p))
    }

    fn reserve_ast(&mut self, count: usize, p: usize) -> std::result::Result<usize, Fail> {
        self.arena
            .reserve_ast(count)
            .map_err(|_| Fail::new(ErrorKind::OutOfMemory, p))
    }
}
