//! Tool palette.

use crate::scene::{Outline, Rgba8, Scene};
use crate::widgets::WidgetTag;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default width of the palette strip on the left edge of the window.
pub const DEFAULT_PALETTE_WIDTH: f64 = 200.0;

const BUTTON_SIZE: Size = Size::new(180.0, 40.0);
const BUTTON_X: f64 = 10.0;
const BUTTON_TOP: f64 = 10.0;
const BUTTON_STRIDE: f64 = 50.0;
const BACKGROUND_HEIGHT: f64 = 600.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Line,
    Polyline,
    Text,
    Button,
    InputField,
    HistoryChart,
    Image,
}

impl ToolKind {
    /// All tools, in palette order.
    pub const ALL: [ToolKind; 9] = [
        ToolKind::Select,
        ToolKind::Rectangle,
        ToolKind::Line,
        ToolKind::Polyline,
        ToolKind::Text,
        ToolKind::Button,
        ToolKind::InputField,
        ToolKind::HistoryChart,
        ToolKind::Image,
    ];

    /// Label shown on the palette button.
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Line => "Line",
            ToolKind::Polyline => "Polyline",
            ToolKind::Text => "Text",
            ToolKind::Button => "Button",
            ToolKind::InputField => "Input Field",
            ToolKind::HistoryChart => "History Graph",
            ToolKind::Image => "Image",
        }
    }

    /// Widget variant this tool creates, `None` for [`ToolKind::Select`].
    pub fn creates(self) -> Option<WidgetTag> {
        match self {
            ToolKind::Select => None,
            ToolKind::Rectangle => Some(WidgetTag::Shape),
            ToolKind::Line => Some(WidgetTag::FreeLine),
            ToolKind::Polyline => Some(WidgetTag::Polyline),
            ToolKind::Text => Some(WidgetTag::Text),
            ToolKind::Button => Some(WidgetTag::Button),
            ToolKind::InputField => Some(WidgetTag::InputField),
            ToolKind::HistoryChart => Some(WidgetTag::HistoryChart),
            ToolKind::Image => Some(WidgetTag::Image),
        }
    }
}

/// Source of the current tool for the editor.
pub trait ToolSource {
    /// Tool applied to clicks on the canvas.
    fn current_tool(&self) -> ToolKind;

    /// Handle a click inside the palette region and return the current tool
    /// afterwards.
    fn handle_click(&mut self, point: Point) -> ToolKind;

    /// Whether `point` belongs to the palette rather than the canvas.
    fn contains(&self, point: Point) -> bool;

    /// Draw the palette. Palettes without a visual do nothing.
    fn render(&self, _scene: &mut Scene) {}
}

/// Vertical strip of tool buttons.
#[derive(Debug, Clone)]
pub struct Palette {
    current: ToolKind,
    width: f64,
    buttons: Vec<(Rect, ToolKind)>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE_WIDTH)
    }
}

impl Palette {
    const CURRENT_COLOR: Rgba8 = Rgba8::rgb(200, 220, 255);
    const BUTTON_COLOR: Rgba8 = Rgba8::rgb(220, 220, 220);
    const BACKGROUND_COLOR: Rgba8 = Rgba8::rgb(240, 240, 240);

    /// Create a palette occupying `x < width`.
    pub fn new(width: f64) -> Self {
        let buttons = ToolKind::ALL
            .iter()
            .enumerate()
            .map(|(i, &tool)| {
                let origin = Point::new(BUTTON_X, BUTTON_TOP + i as f64 * BUTTON_STRIDE);
                (Rect::from_origin_size(origin, BUTTON_SIZE), tool)
            })
            .collect();
        Self {
            current: ToolKind::default(),
            width,
            buttons,
        }
    }

    /// Set the current tool directly.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current = tool;
    }

    /// Rectangle of a tool's button.
    pub fn button_rect(&self, tool: ToolKind) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(_, t)| *t == tool)
            .map(|(rect, _)| *rect)
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

impl ToolSource for Palette {
    fn current_tool(&self) -> ToolKind {
        self.current
    }

    fn handle_click(&mut self, point: Point) -> ToolKind {
        if let Some((_, tool)) = self.buttons.iter().find(|(rect, _)| rect.contains(point)) {
            log::debug!("tool selected: {:?}", tool);
            self.current = *tool;
        }
        self.current
    }

    fn contains(&self, point: Point) -> bool {
        point.x < self.width
    }

    fn render(&self, scene: &mut Scene) {
        scene.fill_rect(
            Rect::new(0.0, 0.0, self.width, BACKGROUND_HEIGHT),
            Self::BACKGROUND_COLOR,
            Some(Outline::new(Rgba8::rgb(180, 180, 180), 2.0)),
        );
        for (rect, tool) in &self.buttons {
            let fill = if *tool == self.current {
                Self::CURRENT_COLOR
            } else {
                Self::BUTTON_COLOR
            };
            scene.fill_rect(*rect, fill, Some(Outline::new(Rgba8::rgb(150, 150, 150), 1.0)));
            scene.text(
                rect.origin() + Vec2::new(10.0, 10.0),
                tool.label(),
                16.0,
                Rgba8::BLACK,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Primitive;

    #[test]
    fn test_default_tool_is_select() {
        let palette = Palette::default();
        assert_eq!(palette.current_tool(), ToolKind::Select);
    }

    #[test]
    fn test_click_on_button_selects_tool() {
        let mut palette = Palette::default();
        // Second button: y in [60, 100)
        assert_eq!(palette.handle_click(Point::new(50.0, 70.0)), ToolKind::Rectangle);
        assert_eq!(palette.current_tool(), ToolKind::Rectangle);

        let rect = palette.button_rect(ToolKind::Image).unwrap();
        assert_eq!(palette.handle_click(rect.center()), ToolKind::Image);
    }

    #[test]
    fn test_click_between_buttons_keeps_tool() {
        let mut palette = Palette::default();
        palette.set_tool(ToolKind::Line);
        // Gap between first and second button
        assert_eq!(palette.handle_click(Point::new(50.0, 55.0)), ToolKind::Line);
        // Below the last button
        assert_eq!(palette.handle_click(Point::new(50.0, 700.0)), ToolKind::Line);
    }

    #[test]
    fn test_region_is_left_strip() {
        let palette = Palette::default();
        assert!(palette.contains(Point::new(199.0, 790.0)));
        assert!(!palette.contains(Point::new(200.0, 10.0)));
    }

    #[test]
    fn test_button_layout() {
        let palette = Palette::default();
        for (i, tool) in ToolKind::ALL.iter().enumerate() {
            let rect = palette.button_rect(*tool).unwrap();
            assert!((rect.y0 - (10.0 + 50.0 * i as f64)).abs() < f64::EPSILON);
            assert!((rect.width() - 180.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_tool_creates() {
        assert_eq!(ToolKind::Select.creates(), None);
        assert_eq!(ToolKind::Rectangle.creates(), Some(WidgetTag::Shape));
        assert_eq!(ToolKind::HistoryChart.creates(), Some(WidgetTag::HistoryChart));
        for tool in &ToolKind::ALL[1..] {
            assert!(tool.creates().is_some());
        }
    }

    #[test]
    fn test_render_highlights_current() {
        let mut palette = Palette::default();
        palette.set_tool(ToolKind::Button);
        let mut scene = Scene::new();
        palette.render(&mut scene);

        // Background, then a rect and a label per tool
        assert_eq!(scene.len(), 1 + 2 * ToolKind::ALL.len());
        assert!(scene.texts().any(|t| t == "History Graph"));
        let highlighted = scene
            .primitives()
            .iter()
            .filter(|p| {
                matches!(p, Primitive::Rect { fill, .. } if *fill == Palette::CURRENT_COLOR)
            })
            .count();
        assert_eq!(highlighted, 1);
    }
}
