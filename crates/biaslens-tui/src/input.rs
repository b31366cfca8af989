//! Prompt input state.
//!
//! A single-line editable field with cursor movement, recall of
//! previously submitted prompts, and a hard character limit: insertions
//! that would exceed the limit are truncated so content never grows past
//! `max_chars`.

/// State for the prompt input field.
#[derive(Debug, Clone)]
pub struct PromptInputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
    /// Maximum content length in characters.
    max_chars: usize,
    /// Previously submitted prompts for up/down recall.
    recall: Vec<String>,
    /// Current recall index (-1 = live input).
    recall_index: isize,
    /// Saved live input while navigating recall.
    saved_input: String,
}

impl PromptInputState {
    /// Create an empty input limited to `max_chars` characters.
    pub fn new(max_chars: usize) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            max_chars: max_chars.max(1),
            recall: Vec::new(),
            recall_index: -1,
            saved_input: String::new(),
        }
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position as a character index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters in the content.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Maximum content length in characters.
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.recall_index = -1;
    }

    /// Byte offset of the cursor into the content.
    fn byte_index(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor, ignoring it at the limit.
    pub fn insert(&mut self, ch: char) {
        if self.char_count() >= self.max_chars {
            return;
        }
        let idx = self.byte_index();
        self.content.insert(idx, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor, truncated to fit the limit.
    pub fn insert_str(&mut self, s: &str) {
        let available = self.max_chars.saturating_sub(self.char_count());
        for ch in s.chars().take(available) {
            let idx = self.byte_index();
            self.content.insert(idx, ch);
            self.cursor += 1;
        }
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.content.remove(idx);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let idx = self.byte_index();
            self.content.remove(idx);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Remember the current content for recall. The content itself is
    /// left in place, since evaluation reads the same field.
    pub fn remember(&mut self) {
        let trimmed = self.content.trim();
        if trimmed.is_empty() {
            return;
        }
        if self.recall.last().map(String::as_str) != Some(self.content.as_str()) {
            self.recall.push(self.content.clone());
        }
        self.recall_index = -1;
        self.saved_input.clear();
    }

    /// Replace the content with the previous recalled prompt.
    pub fn recall_prev(&mut self) {
        if self.recall.is_empty() {
            return;
        }

        if self.recall_index == -1 {
            self.saved_input = self.content.clone();
        }

        let next_index = self.recall_index + 1;
        #[allow(clippy::cast_sign_loss)]
        if (next_index as usize) < self.recall.len() {
            self.recall_index = next_index;
            #[allow(clippy::cast_sign_loss)]
            {
                self.content = self.recall[self.recall.len() - 1 - next_index as usize].clone();
            }
            self.cursor = self.char_count();
        }
    }

    /// Replace the content with the next recalled prompt, restoring the
    /// live input at the bottom.
    pub fn recall_next(&mut self) {
        if self.recall_index <= 0 {
            if self.recall_index == 0 {
                self.content = std::mem::take(&mut self.saved_input);
                self.cursor = self.char_count();
            }
            self.recall_index = -1;
            return;
        }

        self.recall_index -= 1;
        #[allow(clippy::cast_sign_loss)]
        {
            self.content =
                self.recall[self.recall.len() - 1 - self.recall_index as usize].clone();
        }
        self.cursor = self.char_count();
    }
}
