//! Input events delivered by a windowing shell.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A single event from the shell's event loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown { position: Point, button: MouseButton },
    /// A typed character, as a Unicode code point.
    Text { code: u32 },
    CloseRequested,
}

impl InputEvent {
    /// Left-button press at `(x, y)`.
    pub fn click(x: f64, y: f64) -> Self {
        InputEvent::PointerDown {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// One event per character of `text`.
    pub fn typed(text: &str) -> Vec<Self> {
        text.chars()
            .map(|ch| InputEvent::Text { code: ch as u32 })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_expands_characters() {
        let events = InputEvent::typed("ab");
        assert_eq!(
            events,
            vec![InputEvent::Text { code: 97 }, InputEvent::Text { code: 98 }]
        );
    }

    #[test]
    fn test_event_json() {
        let event: InputEvent = serde_json::from_str(
            r#"{"event":"pointer_down","position":{"x":10.0,"y":20.0},"button":"Left"}"#,
        )
        .unwrap();
        assert_eq!(event, InputEvent::click(10.0, 20.0));
    }
}
