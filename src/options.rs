/// Object key count above which keys are sorted at parse time and looked up
/// with binary search.
pub const DEFAULT_KEY_SORT_THRESHOLD: usize = 100;

/// Knobs for a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Objects with more keys than this are sorted by (length, bytes) when
    /// installed, making lookups O(log n). `None` disables sorting entirely:
    /// keys keep document order and every lookup is a linear scan.
    pub key_sort_threshold: Option<usize>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_sort_threshold(mut self, key_sort_threshold: Option<usize>) -> Self {
        self.key_sort_threshold = key_sort_threshold;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            key_sort_threshold: Some(DEFAULT_KEY_SORT_THRESHOLD),
        }
    }
}
