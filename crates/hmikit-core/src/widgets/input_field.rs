//! Single-line text input.

use crate::scene::Rgba8;
use serde::Serialize;

/// Character code that deletes the last character.
pub const BACKSPACE: u32 = 8;

/// Text entry state of an input field.
///
/// Keystrokes are only accepted while the field is active; which field is
/// active is decided by the editor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InputField {
    active: bool,
    value: String,
}

impl InputField {
    pub const ACTIVE_COLOR: Rgba8 = Rgba8::rgb(240, 240, 255);
    pub const TEXT_SIZE: f64 = 16.0;

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Captured text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Apply one keystroke.
    ///
    /// Printable ASCII is appended, backspace removes the last character,
    /// everything else is ignored.
    pub fn handle_character(&mut self, code: u32) {
        if !self.active {
            return;
        }
        if code == BACKSPACE {
            self.value.pop();
        } else if (32..127).contains(&code) {
            if let Some(ch) = char::from_u32(code) {
                self.value.push(ch);
            }
        }
    }

    /// Text to draw, with a caret while active.
    pub fn display_text(&self) -> String {
        if self.active {
            format!("{}|", self.value)
        } else {
            self.value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(field: &mut InputField, s: &str) {
        for ch in s.chars() {
            field.handle_character(ch as u32);
        }
    }

    #[test]
    fn test_inactive_ignores_input() {
        let mut field = InputField::default();
        type_str(&mut field, "abc");
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = InputField::default();
        field.set_active(true);
        type_str(&mut field, "Tank 1");
        assert_eq!(field.value(), "Tank 1");

        field.handle_character(BACKSPACE);
        field.handle_character(BACKSPACE);
        assert_eq!(field.value(), "Tank");
    }

    #[test]
    fn test_backspace_on_empty() {
        let mut field = InputField::default();
        field.set_active(true);
        field.handle_character(BACKSPACE);
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_non_printable_ignored() {
        let mut field = InputField::default();
        field.set_active(true);
        field.handle_character(13); // return
        field.handle_character(127); // delete
        field.handle_character('é' as u32);
        field.handle_character('~' as u32);
        field.handle_character(' ' as u32);
        assert_eq!(field.value(), "~ ");
    }

    #[test]
    fn test_display_text_caret() {
        let mut field = InputField::default();
        field.set_active(true);
        type_str(&mut field, "42");
        assert_eq!(field.display_text(), "42|");
        field.set_active(false);
        assert_eq!(field.display_text(), "42");
    }
}
