//! Phrase progress
//!
//! Words are handed out to obstacles in order by a monotonic spawn cursor and
//! revealed in the same order as obstacles are cleared.

/// Target phrase plus how much of it has been spawned and revealed
#[derive(Debug, Clone)]
pub struct Phrase {
    words: Vec<String>,
    spawned: usize,
    revealed: Vec<String>,
}

impl Phrase {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words,
            spawned: 0,
            revealed: Vec::new(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of words already handed to obstacles
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    pub fn all_spawned(&self) -> bool {
        self.spawned >= self.words.len()
    }

    /// Hand out the next word, advancing the cursor
    pub fn next_word(&mut self) -> Option<String> {
        let word = self.words.get(self.spawned)?.clone();
        self.spawned += 1;
        Some(word)
    }

    pub fn revealed(&self) -> &[String] {
        &self.revealed
    }

    /// Append a word; returns true if the phrase is now complete
    pub fn reveal(&mut self, word: String) -> bool {
        self.revealed.push(word);
        self.is_complete()
    }

    /// Revealed words, space-joined
    pub fn revealed_text(&self) -> String {
        self.revealed.join(" ")
    }

    pub fn target_text(&self) -> String {
        self.words.join(" ")
    }

    pub fn is_complete(&self) -> bool {
        self.revealed_text() == self.target_text()
    }

    /// Revealed words match the start of the target
    pub fn is_prefix(&self) -> bool {
        self.revealed.len() <= self.words.len()
            && self.revealed.iter().zip(&self.words).all(|(r, w)| r == w)
    }

    pub fn reset(&mut self) {
        self.spawned = 0;
        self.revealed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase() -> Phrase {
        Phrase::new(
            ["Rachel,", "will", "you", "be", "my", "valentine?", "<3"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
        )
    }

    #[test]
    fn test_cursor_hands_out_words_in_order_then_stops() {
        let mut p = phrase();
        let handed: Vec<String> = std::iter::from_fn(|| p.next_word()).collect();
        assert_eq!(handed, p.words());
        assert!(p.all_spawned());
        assert_eq!(p.next_word(), None);
        assert_eq!(p.spawned(), 7);
    }

    #[test]
    fn test_complete_only_after_last_word() {
        let mut p = phrase();
        let words = p.words().to_vec();
        for (i, word) in words.into_iter().enumerate() {
            let complete = p.reveal(word);
            assert_eq!(complete, i == 6);
            assert!(p.is_prefix());
        }
        assert_eq!(p.revealed_text(), "Rachel, will you be my valentine? <3");
    }

    #[test]
    fn test_reset_rewinds_everything() {
        let mut p = phrase();
        let w = p.next_word().unwrap();
        p.reveal(w);
        p.reset();
        assert_eq!(p.spawned(), 0);
        assert!(p.revealed().is_empty());
        assert_eq!(p.revealed_text(), "");
    }

    #[test]
    fn test_out_of_order_is_not_prefix() {
        let mut p = phrase();
        p.reveal("will".into());
        assert!(!p.is_prefix());
    }
}
