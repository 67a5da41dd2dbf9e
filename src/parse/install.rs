//! Frame finalization: copies a completed scratch frame onto the AST stack
//! as a record whose element words carry offsets relative to the record
//! base. Records never move afterwards, so traversal is pure index
//! arithmetic.
//!
//! The caller pops the frame (resetting the scratch top) before calling
//! install, so the reservation may overlay the dead frame's cells; that is
//! what makes the one-word-per-input-byte arena bound hold. Elements are
//! therefore copied highest-first, and the length header is written last:
//! every write lands at or above the cell it was read from, and cells still
//! to be read sit below every write so far.

use std::cmp::Ordering;

use crate::ast::arena::{Arena, Oom};
use crate::ast::{element_tag, element_value, key_span_order, make_element};

/// Installs the array frame previously held at scratch offsets
/// `frame_start..frame_end` (one word per element, in document order).
pub(crate) fn install_array(
    arena: &mut Arena,
    frame_start: usize,
    frame_end: usize,
) -> Result<(), Oom> {
    let length = frame_end - frame_start;
    let new_base = arena.reserve_ast(length + 1)?;

    for index in (0..length).rev() {
        let element = arena.word(frame_start + index);
        let payload = arena.index_from_write_offset(element_value(element));
        arena.set_word(
            new_base + 1 + index,
            make_element(element_tag(element), payload - new_base),
        );
    }
    arena.set_word(new_base, length);
    Ok(())
}

/// Installs the object frame previously held at scratch offsets
/// `frame_start..frame_end` (three words per member: key start, key end,
/// element). Frames larger than the sort threshold are reordered by
/// (key length, key bytes) first so lookups can binary search.
pub(crate) fn install_object(
    arena: &mut Arena,
    frame_start: usize,
    frame_end: usize,
    input: &[u8],
    key_sort_threshold: Option<usize>,
) -> Result<(), Oom> {
    debug_assert_eq!((frame_end - frame_start) % 3, 0);
    let length = (frame_end - frame_start) / 3;

    if let Some(threshold) = key_sort_threshold {
        if length > threshold {
            let records = as_member_records_mut(arena.words_mut(frame_start, frame_end));
            records.sort_unstable_by(|a, b| member_order(input, a, b));
        }
    }

    let new_base = arena.reserve_ast(3 * length + 1)?;

    for index in (0..length).rev() {
        let key_start = arena.word(frame_start + 3 * index);
        let key_end = arena.word(frame_start + 3 * index + 1);
        let element = arena.word(frame_start + 3 * index + 2);
        let payload = arena.index_from_write_offset(element_value(element));

        let out = new_base + 1 + 3 * index;
        arena.set_word(out, key_start);
        arena.set_word(out + 1, key_end);
        arena.set_word(
            out + 2,
            make_element(element_tag(element), payload - new_base),
        );
    }
    arena.set_word(new_base, length);
    Ok(())
}

fn member_order(input: &[u8], a: &[usize; 3], b: &[usize; 3]) -> Ordering {
    key_span_order(input, (a[0], a[1]), (b[0], b[1]))
}

fn as_member_records_mut(words: &mut [usize]) -> &mut [[usize; 3]] {
    debug_assert_eq!(words.len() % 3, 0);
    // Invariant: [usize; 3] is layout-identical to three consecutive words.
    unsafe { std::slice::from_raw_parts_mut(words.as_mut_ptr().cast(), words.len() / 3) }
}
