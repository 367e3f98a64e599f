//! Display list produced by a render pass.
//!
//! Widgets and the palette render into a [`Scene`] of backend-neutral
//! primitives. A GPU backend walks the list in order; the headless shell
//! serializes it.

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Random opaque color.
    pub fn random() -> Self {
        Self::rgb(rand::random(), rand::random(), rand::random())
    }
}

/// Scene colors handed to a vello backend.
impl From<Rgba8> for Color {
    fn from(color: Rgba8) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke drawn around a filled rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Outline {
    pub color: Rgba8,
    pub width: f64,
}

impl Outline {
    pub fn new(color: Rgba8, width: f64) -> Self {
        Self { color, width }
    }
}

/// A single drawing command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Rect {
        rect: Rect,
        fill: Rgba8,
        outline: Option<Outline>,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba8,
    },
    Text {
        origin: Point,
        text: String,
        size: f64,
        color: Rgba8,
    },
    /// Decoded pixels of the named image widget, scaled into `rect`.
    Image {
        rect: Rect,
        scale: Vec2,
        widget: String,
    },
}

/// Ordered list of primitives for one frame (back to front).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Push a filled rectangle.
    pub fn fill_rect(&mut self, rect: Rect, fill: Rgba8, outline: Option<Outline>) {
        self.push(Primitive::Rect {
            rect,
            fill,
            outline,
        });
    }

    pub fn line(&mut self, from: Point, to: Point, color: Rgba8) {
        self.push(Primitive::Line { from, to, color });
    }

    pub fn text(&mut self, origin: Point, text: impl Into<String>, size: f64, color: Rgba8) {
        self.push(Primitive::Text {
            origin,
            text: text.into(),
            size,
            color,
        });
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Text of every text primitive, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_into_peniko() {
        let color: Color = Rgba8::new(100, 150, 200, 128).into();
        let rgba = color.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (100, 150, 200, 128));
    }

    #[test]
    fn test_scene_order_and_texts() {
        let mut scene = Scene::new();
        scene.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Rgba8::WHITE, None);
        scene.text(Point::new(1.0, 1.0), "a", 16.0, Rgba8::BLACK);
        scene.line(Point::ZERO, Point::new(5.0, 5.0), Rgba8::BLUE);
        scene.text(Point::new(2.0, 2.0), "b", 16.0, Rgba8::BLACK);

        assert_eq!(scene.len(), 4);
        assert!(matches!(scene.primitives()[0], Primitive::Rect { .. }));
        assert_eq!(scene.texts().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_primitive_json_tag() {
        let mut scene = Scene::new();
        scene.line(Point::ZERO, Point::new(1.0, 1.0), Rgba8::BLACK);
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["primitives"][0]["kind"], "line");
    }
}
