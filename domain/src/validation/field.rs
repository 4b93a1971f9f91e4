//! Field edit predicates
//!
//! The interactive surface calls these before applying an edit, passing the
//! text the field *would* contain afterwards. Returning `false` drops the
//! keystroke; the rest of the field is untouched.

/// Kind of edit being applied to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    Insert,
    Delete,
    /// Focus changes, programmatic resets and the like
    Other,
}

/// The two numeric fields of the chat window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    TokenLimit,
    Temperature,
}

impl NumericField {
    /// Dispatch to the predicate for this field
    pub fn accepts(&self, proposed: &str, kind: EditKind) -> bool {
        match self {
            NumericField::TokenLimit => accept_token_edit(proposed, kind),
            NumericField::Temperature => accept_temperature_edit(proposed, kind),
        }
    }
}

/// Token limit: insertions must leave a non-empty run of ASCII digits.
pub fn accept_token_edit(proposed: &str, kind: EditKind) -> bool {
    match kind {
        EditKind::Insert => !proposed.is_empty() && proposed.chars().all(|c| c.is_ascii_digit()),
        EditKind::Delete | EditKind::Other => true,
    }
}

/// Temperature: insertions must leave text that parses as a float.
pub fn accept_temperature_edit(proposed: &str, kind: EditKind) -> bool {
    match kind {
        EditKind::Insert => proposed.trim().parse::<f64>().is_ok(),
        EditKind::Delete | EditKind::Other => true,
    }
}
