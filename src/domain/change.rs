//! Signed percentage-change text.
//!
//! The listing shows change values without a sign and marks direction with a
//! CSS class on the cell. The sign is folded back into the text here.

/// Class marking a rising value.
pub const POSITIVE_CLASS: &str = "arz-positive";
/// Class marking a falling value.
pub const NEGATIVE_CLASS: &str = "arz-negative";

/// Direction indicated by a change cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Positive,
    Negative,
    Unmarked,
}

impl ChangeDirection {
    /// Resolve direction from an element's class list.
    pub fn from_classes<'a>(classes: impl Iterator<Item = &'a str>) -> Self {
        let mut direction = Self::Unmarked;
        for class in classes {
            match class {
                POSITIVE_CLASS => return Self::Positive,
                NEGATIVE_CLASS => direction = Self::Negative,
                _ => {}
            }
        }
        direction
    }
}

/// Prefix `text` with the sign implied by `direction`.
///
/// Text that already starts with a sign is returned unchanged.
pub fn signed_change(text: &str, direction: ChangeDirection) -> String {
    match direction {
        ChangeDirection::Positive if !text.starts_with(['+', '-']) => format!("+{text}"),
        ChangeDirection::Negative if !text.starts_with('-') => format!("-{text}"),
        _ => text.to_string(),
    }
}
