//! Widgets placed on the HMI canvas.
//!
//! Every widget shares a bounding rectangle, a color, a display text and an
//! optional bound variable. Variant-specific state lives in [`WidgetKind`].

mod button;
mod history_chart;
mod image;
mod input_field;
mod line;

pub use button::{Button, ButtonAction};
pub use history_chart::{HISTORY_CAPACITY, HistoryChart};
pub use image::{ImageFormat, ImageWidget, LoadedImage};
pub use input_field::{BACKSPACE, InputField};
pub use line::{FreeLine, Polyline};

use crate::scene::{Outline, Rgba8, Scene};
use crate::variables::VariableStore;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Size given to widgets that are not sized explicitly.
pub const DEFAULT_SIZE: Size = Size::new(100.0, 50.0);

const OUTLINE_WIDTH: f64 = 2.0;
const LABEL_SIZE: f64 = 20.0;

/// Minimum thickness of a line's hit area.
pub const LINE_HIT_WIDTH: f64 = 4.0;

/// Discriminant of a widget variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetTag {
    Shape,
    Text,
    FreeLine,
    Polyline,
    Button,
    InputField,
    HistoryChart,
    Image,
}

impl WidgetTag {
    pub const ALL: [WidgetTag; 8] = [
        WidgetTag::Shape,
        WidgetTag::Text,
        WidgetTag::FreeLine,
        WidgetTag::Polyline,
        WidgetTag::Button,
        WidgetTag::InputField,
        WidgetTag::HistoryChart,
        WidgetTag::Image,
    ];

    /// Fill color a freshly constructed widget of this variant gets.
    pub fn default_color(self) -> Rgba8 {
        match self {
            WidgetTag::Shape | WidgetTag::Image => Rgba8::rgb(200, 200, 200),
            WidgetTag::Text => Rgba8::TRANSPARENT,
            WidgetTag::FreeLine => Rgba8::BLACK,
            WidgetTag::Polyline => Rgba8::BLUE,
            WidgetTag::Button => Rgba8::rgb(100, 150, 200),
            WidgetTag::InputField => Rgba8::WHITE,
            WidgetTag::HistoryChart => Rgba8::rgb(150, 200, 150),
        }
    }

    /// Prefix used for generated widget ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            WidgetTag::Shape => "rect",
            WidgetTag::Text => "text",
            WidgetTag::FreeLine => "line",
            WidgetTag::Polyline => "poly",
            WidgetTag::Button => "btn",
            WidgetTag::InputField => "input",
            WidgetTag::HistoryChart => "graph",
            WidgetTag::Image => "img",
        }
    }
}

/// Variant-specific widget state.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidgetKind {
    Shape,
    Text,
    FreeLine(FreeLine),
    Polyline(Polyline),
    Button(Button),
    InputField(InputField),
    HistoryChart(HistoryChart),
    Image(ImageWidget),
}

impl WidgetKind {
    /// Empty state for the given variant.
    pub fn for_tag(tag: WidgetTag) -> Self {
        match tag {
            WidgetTag::Shape => WidgetKind::Shape,
            WidgetTag::Text => WidgetKind::Text,
            WidgetTag::FreeLine => WidgetKind::FreeLine(FreeLine::default()),
            WidgetTag::Polyline => WidgetKind::Polyline(Polyline::default()),
            WidgetTag::Button => WidgetKind::Button(Button::default()),
            WidgetTag::InputField => WidgetKind::InputField(InputField::default()),
            WidgetTag::HistoryChart => WidgetKind::HistoryChart(HistoryChart::default()),
            WidgetTag::Image => WidgetKind::Image(ImageWidget::default()),
        }
    }

    pub fn tag(&self) -> WidgetTag {
        match self {
            WidgetKind::Shape => WidgetTag::Shape,
            WidgetKind::Text => WidgetTag::Text,
            WidgetKind::FreeLine(_) => WidgetTag::FreeLine,
            WidgetKind::Polyline(_) => WidgetTag::Polyline,
            WidgetKind::Button(_) => WidgetTag::Button,
            WidgetKind::InputField(_) => WidgetTag::InputField,
            WidgetKind::HistoryChart(_) => WidgetTag::HistoryChart,
            WidgetKind::Image(_) => WidgetTag::Image,
        }
    }
}

/// A visual element on the canvas.
#[derive(Debug, Clone, Serialize)]
pub struct Widget {
    pub(crate) id: String,
    /// Top-left corner.
    pub position: Point,
    pub size: Size,
    pub color: Rgba8,
    /// Display text (label, caption or bound text value).
    pub text: String,
    /// Variable read on every refresh.
    pub binding: Option<String>,
    pub kind: WidgetKind,
}

impl Widget {
    /// Create a widget of the given variant at the origin with default size
    /// and color.
    pub fn new(tag: WidgetTag, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: Point::ZERO,
            size: DEFAULT_SIZE,
            color: tag.default_color(),
            text: String::new(),
            binding: None,
            kind: WidgetKind::for_tag(tag),
        }
    }

    /// Create a line widget whose bounds enclose both endpoints.
    ///
    /// A horizontal or vertical line gets bounds [`LINE_HIT_WIDTH`] thick
    /// across its flat axis so it can still be hit.
    pub fn free_line(id: impl Into<String>, start: Point, end: Point) -> Self {
        let bounds = Rect::from_points(start, end);
        let pad = |extent: f64| {
            if extent < LINE_HIT_WIDTH {
                (LINE_HIT_WIDTH - extent) / 2.0
            } else {
                0.0
            }
        };
        let bounds = bounds.inflate(pad(bounds.width()), pad(bounds.height()));
        let mut widget = Self::new(WidgetTag::FreeLine, id)
            .with_position(bounds.origin())
            .with_size(bounds.size());
        widget.kind = WidgetKind::FreeLine(FreeLine::new(start, end));
        widget
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Rgba8) -> Self {
        self.color = color;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_binding(mut self, name: impl Into<String>) -> Self {
        self.binding = Some(name.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> WidgetTag {
        self.kind.tag()
    }

    /// Axis-aligned bounding rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Whether `point` lies inside the bounds (right and bottom edges
    /// excluded).
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Pull the bound variable from the store.
    ///
    /// Every variant takes a text value as its display text; history charts
    /// additionally record a float value as a sample. Missing or
    /// differently-typed values leave the widget untouched.
    pub fn refresh(&mut self, store: &VariableStore) {
        let Some(binding) = self.binding.as_deref() else {
            return;
        };
        if let Some(text) = store.get_as::<String>(binding) {
            self.text = text;
        }
        if let WidgetKind::HistoryChart(chart) = &mut self.kind {
            if let Some(sample) = store.get_as::<f32>(binding) {
                chart.add_sample(sample);
            }
        }
    }

    /// Append this widget's drawing commands to `scene`.
    pub fn render(&self, scene: &mut Scene) {
        let bounds = self.bounds();
        let outline = Some(Outline::new(Rgba8::BLACK, OUTLINE_WIDTH));

        match &self.kind {
            WidgetKind::Shape => scene.fill_rect(bounds, self.color, outline),
            WidgetKind::Text => {
                if !self.text.is_empty() {
                    scene.text(self.position, self.text.as_str(), LABEL_SIZE, Rgba8::BLACK);
                }
            }
            WidgetKind::FreeLine(line) => scene.line(line.start, line.end, self.color),
            WidgetKind::Polyline(poly) => {
                let origin = self.position.to_vec2();
                for pair in poly.points.windows(2) {
                    scene.line(pair[0] + origin, pair[1] + origin, self.color);
                }
            }
            WidgetKind::Button(button) => {
                let fill = if button.is_pressed() {
                    Button::PRESSED_COLOR
                } else {
                    self.color
                };
                scene.fill_rect(bounds, fill, outline);
                if !self.text.is_empty() {
                    scene.text(
                        self.position + Vec2::new(10.0, 10.0),
                        self.text.as_str(),
                        Button::LABEL_SIZE,
                        Rgba8::WHITE,
                    );
                }
            }
            WidgetKind::InputField(field) => {
                let fill = if field.is_active() {
                    InputField::ACTIVE_COLOR
                } else {
                    self.color
                };
                scene.fill_rect(bounds, fill, outline);
                scene.text(
                    self.position + Vec2::new(5.0, 5.0),
                    field.display_text(),
                    InputField::TEXT_SIZE,
                    Rgba8::BLACK,
                );
            }
            WidgetKind::HistoryChart(chart) => chart.render(bounds, self.color, scene),
            WidgetKind::Image(image) => match image.pixels() {
                Some(pixels) => scene.push(crate::scene::Primitive::Image {
                    rect: bounds,
                    scale: pixels.scale_to(self.size),
                    widget: self.id.clone(),
                }),
                None => {
                    scene.fill_rect(bounds, self.color, outline);
                    scene.text(
                        self.position + Vec2::new(10.0, 10.0),
                        "Image",
                        LABEL_SIZE,
                        Rgba8::BLACK,
                    );
                }
            },
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match &mut self.kind {
            WidgetKind::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_input_field(&self) -> Option<&InputField> {
        match &self.kind {
            WidgetKind::InputField(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_input_field_mut(&mut self) -> Option<&mut InputField> {
        match &mut self.kind {
            WidgetKind::InputField(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_history_chart(&self) -> Option<&HistoryChart> {
        match &self.kind {
            WidgetKind::HistoryChart(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_history_chart_mut(&mut self) -> Option<&mut HistoryChart> {
        match &mut self.kind {
            WidgetKind::HistoryChart(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageWidget> {
        match &self.kind {
            WidgetKind::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageWidget> {
        match &mut self.kind {
            WidgetKind::Image(i) => Some(i),
            _ => None,
        }
    }
}
