//! Word-bounded text splitting.

/// Default number of words per chunk.
pub const DEFAULT_TARGET_WORDS: usize = 250;

/// Split `text` into pieces of at most `target_words` whitespace-separated words.
///
/// Words are re-joined with a single space, so runs of whitespace inside a
/// piece collapse. Input with no words yields a single empty piece; callers
/// treat that as a degenerate one-chunk library.
///
/// A `target_words` of zero is treated as one word per piece.
pub fn split_words(text: &str, target_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }

    words
        .chunks(target_words.max(1))
        .map(|piece| piece.join(" "))
        .collect()
}
