//! Single-line editable text buffer with a byte cursor

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    cursor: usize,
}

impl TextField {
    /// Field holding `text` with the cursor at the end
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text the field would hold after inserting `s` at the cursor
    pub fn with_inserted(&self, s: &str) -> String {
        let mut proposed = self.text.clone();
        proposed.insert_str(self.cursor, s);
        proposed
    }

    /// Text after a backspace, `None` when the cursor is at the start
    pub fn with_deleted_back(&self) -> Option<String> {
        let len = self.prev_char_len()?;
        let mut proposed = self.text.clone();
        proposed.replace_range(self.cursor - len..self.cursor, "");
        Some(proposed)
    }

    /// Text after a forward delete, `None` when the cursor is at the end
    pub fn with_deleted_forward(&self) -> Option<String> {
        let len = self.next_char_len()?;
        let mut proposed = self.text.clone();
        proposed.replace_range(self.cursor..self.cursor + len, "");
        Some(proposed)
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn delete_back(&mut self) {
        if let Some(len) = self.prev_char_len() {
            self.cursor -= len;
            self.text.replace_range(self.cursor..self.cursor + len, "");
        }
    }

    pub fn delete_forward(&mut self) {
        if let Some(len) = self.next_char_len() {
            self.text.replace_range(self.cursor..self.cursor + len, "");
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(len) = self.prev_char_len() {
            self.cursor -= len;
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(len) = self.next_char_len() {
            self.cursor += len;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Take the contents and clear the field
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn prev_char_len(&self) -> Option<usize> {
        self.text[..self.cursor].chars().next_back().map(char::len_utf8)
    }

    fn next_char_len(&self) -> Option<usize> {
        self.text[self.cursor..].chars().next().map(char::len_utf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete_at_cursor() {
        let mut field = TextField::new("hllo");
        field.cursor_home();
        field.cursor_right();
        field.insert_str("e");
        assert_eq!(field.text(), "hello");
        assert_eq!(field.cursor(), 2);

        field.delete_back();
        assert_eq!(field.text(), "hllo");
        field.delete_forward();
        assert_eq!(field.text(), "hlo");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut field = TextField::new("añb");
        field.cursor_left();
        field.delete_back();
        assert_eq!(field.text(), "ab");
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn test_proposals_do_not_mutate() {
        let field = TextField::new("20");
        assert_eq!(field.with_inserted("a"), "20a");
        assert_eq!(field.with_deleted_back().as_deref(), Some("2"));
        assert_eq!(field.with_deleted_forward(), None);
        assert_eq!(field.text(), "20");
    }

    #[test]
    fn test_take_clears() {
        let mut field = TextField::new("question");
        assert_eq!(field.take(), "question");
        assert!(field.is_empty());
        assert_eq!(field.cursor(), 0);
        assert_eq!(field.with_deleted_back(), None);
    }
}
