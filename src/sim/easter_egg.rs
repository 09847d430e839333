//! Hidden-input trigger buffer
//!
//! Keeps the last few typed characters and matches them, lowercased, against
//! a trigger substring. A match clears the buffer.

use crate::consts::EASTER_BUFFER_LEN;

#[derive(Debug, Clone)]
pub struct TriggerBuffer {
    buf: String,
    trigger: String,
}

impl TriggerBuffer {
    pub fn new(trigger: &str) -> Self {
        Self {
            buf: String::new(),
            trigger: trigger.to_lowercase(),
        }
    }

    /// Append input characters and report whether the trigger appeared.
    /// The match is checked before truncation so a trigger that straddles
    /// the incoming chunk still fires; afterwards only the last 10
    /// characters are kept (oldest dropped first).
    pub fn push(&mut self, input: &str) -> bool {
        self.buf.push_str(input);
        if !self.trigger.is_empty() && self.buf.to_lowercase().contains(&self.trigger) {
            self.buf.clear();
            return true;
        }
        let excess = self.buf.chars().count().saturating_sub(EASTER_BUFFER_LEN);
        if excess > 0 {
            self.buf = self.buf.chars().skip(excess).collect();
        }
        false
    }

    pub fn len(&self) -> usize {
        self.buf.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_match_clears_buffer() {
        let mut buf = TriggerBuffer::new("root");
        assert!(!buf.push("ro"));
        assert!(!buf.push("o"));
        assert!(buf.push("t"));
        assert!(buf.is_empty());
        // One-shot: the cleared buffer needs the full trigger again
        assert!(!buf.push("t"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let mut buf = TriggerBuffer::new("root");
        assert!(buf.push("RoOt"));
    }

    #[test]
    fn test_ring_keeps_last_ten() {
        let mut buf = TriggerBuffer::new("root");
        assert!(!buf.push("abcdefghijkl"));
        assert_eq!(buf.len(), 10);
        // Oldest dropped first: "ab" is gone, tail survives
        assert!(!buf.push("r"));
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn test_trigger_straddles_ring_tail() {
        let mut buf = TriggerBuffer::new("root");
        assert!(!buf.push("abcdefxr"));
        // "...xr" + "oot" contains "root"
        assert!(buf.push("oot"));
        assert!(buf.is_empty());
    }

    proptest! {
        #[test]
        fn prop_len_never_exceeds_capacity(chunks in proptest::collection::vec("[a-z]{0,8}", 0..40)) {
            let mut buf = TriggerBuffer::new("root");
            for chunk in &chunks {
                buf.push(chunk);
                prop_assert!(buf.len() <= EASTER_BUFFER_LEN);
            }
        }
    }
}
