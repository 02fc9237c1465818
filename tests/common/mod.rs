#![allow(dead_code)]

use std::sync::Arc;

use context_vault::{LibraryService, LibraryStore};

pub const FILLER: [&str; 4] = ["alpha", "bravo", "charlie", "delta"];

pub fn service() -> LibraryService {
    LibraryService::new(Arc::new(LibraryStore::new()))
}

/// `words` filler words, cycling through a fixed vocabulary.
pub fn filler_words(words: usize) -> Vec<String> {
    (0..words).map(|i| FILLER[i % FILLER.len()].to_string()).collect()
}

pub fn filler_text(words: usize) -> String {
    filler_words(words).join(" ")
}

/// Filler text with `marker` substituted at word position `at`.
pub fn text_with_marker(words: usize, at: usize, marker: &str) -> String {
    let mut words = filler_words(words);
    words[at] = marker.to_string();
    words.join(" ")
}
