// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Word motions. A word is a maximal run of non-whitespace graphemes. Each motion
//! returns `true` if the cursor moved.

use super::LineBuffer;

impl LineBuffer {
    /// From inside (or on the first grapheme of) a word, step forward to just past its
    /// last grapheme. Does nothing at the end, or on whitespace.
    pub fn move_to_end_of_word(&mut self) -> bool {
        if self.is_at_end() || !self.is_at_character() {
            return false;
        }
        let start = self.cursor();
        while self.is_at_character() {
            self.move_right();
        }
        self.cursor() != start
    }

    /// From inside a word, step back to its first grapheme. Does nothing at position
    /// 0, or on whitespace.
    pub fn move_to_beginning_of_word(&mut self) -> bool {
        if self.cursor() == 0 || !self.is_at_character() {
            return false;
        }
        let start = self.cursor();
        while self.cursor() > 0 && self.is_whitespace_at(self.cursor() - 1) == Some(false)
        {
            self.move_left();
        }
        self.cursor() != start
    }

    /// Skip the rest of the current word, then any whitespace, landing on the first
    /// grapheme of the next word (or the end).
    pub fn move_to_next_word(&mut self) -> bool {
        let start = self.cursor();
        if self.is_at_character() {
            self.move_to_end_of_word();
        }
        while !self.is_at_end() && !self.is_at_character() {
            self.move_right();
        }
        self.cursor() != start
    }

    /// Land on the first grapheme of the previous word. From the first grapheme of a
    /// word this is the word before it; from anywhere else inside a word it is the
    /// start of that word.
    pub fn move_to_previous_word(&mut self) -> bool {
        let start = self.cursor();
        if self.is_at_character() && self.is_at_beginning_of_word() {
            self.move_left();
        }
        while self.cursor() > 0 && !self.is_at_character() {
            self.move_left();
        }
        self.move_to_beginning_of_word();
        self.cursor() != start
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    fn buffer_at(content: &str, position: usize) -> LineBuffer {
        let mut it = LineBuffer::new(content);
        it.set_position(position);
        it
    }

    #[test]
    fn test_previous_word_from_end_lands_on_last_word() {
        let mut buffer = LineBuffer::new("Foo Bar Baz");
        assert!(buffer.move_to_previous_word());
        assert_eq!(buffer.cursor(), 8);
    }

    #[test]
    fn test_previous_word_walks_back_word_by_word() {
        let mut buffer = buffer_at("Foo Bar Baz", 8);
        buffer.move_to_previous_word();
        assert_eq!(buffer.cursor(), 4);
        buffer.move_to_previous_word();
        assert_eq!(buffer.cursor(), 0);
        assert!(!buffer.move_to_previous_word());
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_previous_word_from_inside_word_goes_to_its_start() {
        let mut buffer = buffer_at("Foo Bar", 6);
        buffer.move_to_previous_word();
        assert_eq!(buffer.cursor(), 4);
    }

    #[test_case("Foo Bar", 0, 4 ; "from word start to next word")]
    #[test_case("Foo", 0, 3 ; "single word goes to end")]
    #[test_case("Foo Bar Baz", 3, 4 ; "from whitespace to next word")]
    #[test_case("Foo   Bar", 1, 6 ; "skips a run of whitespace")]
    #[test_case("Foo ", 4, 4 ; "at end stays put")]
    fn test_next_word(content: &str, from: usize, expected: usize) {
        let mut buffer = buffer_at(content, from);
        buffer.move_to_next_word();
        assert_eq!(buffer.cursor(), expected);
    }

    #[test]
    fn test_emoji_word_is_navigated_as_graphemes() {
        let mut buffer = buffer_at("😄😄 x", 0);
        buffer.move_to_next_word();
        assert_eq!(buffer.cursor(), 3);
        buffer.move_to_previous_word();
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_end_and_beginning_of_word() {
        let mut buffer = buffer_at("git push", 5);
        assert!(buffer.move_to_end_of_word());
        assert_eq!(buffer.cursor(), 8);
        assert!(!buffer.move_to_end_of_word());

        let mut buffer = buffer_at("git push", 6);
        assert!(buffer.move_to_beginning_of_word());
        assert_eq!(buffer.cursor(), 4);

        // On whitespace, neither moves.
        let mut buffer = buffer_at("git push", 3);
        assert!(!buffer.move_to_end_of_word());
        assert!(!buffer.move_to_beginning_of_word());
    }
}
