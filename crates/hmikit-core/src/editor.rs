//! Editor session: owns the widgets and the variable store and routes
//! pointer and keyboard input.

use crate::config::EditorConfig;
use crate::input::{InputEvent, MouseButton};
use crate::scene::{Outline, Rgba8, Scene};
use crate::tools::{Palette, ToolKind, ToolSource};
use crate::variables::VariableStore;
use crate::widgets::{
    Button, ButtonAction, HistoryChart, Polyline, Widget, WidgetKind, WidgetTag,
};
use kurbo::{Point, Rect, Size, Vec2};
use std::path::{Path, PathBuf};

/// Variable holding the number of widgets created with palette tools.
pub const OBJECT_COUNT_VAR: &str = "object_count";
/// Variable the default text, button and chart widgets are wired to.
pub const SENSOR_VAR: &str = "sensor_value";

const WORKSPACE_COLOR: Rgba8 = Rgba8::rgb(250, 250, 250);
const WORKSPACE_BORDER: Rgba8 = Rgba8::rgb(200, 200, 200);

/// What a pointer press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The press landed on the palette; carries the tool current afterwards.
    Palette(ToolKind),
    /// The button at this index was activated.
    Button(usize),
    /// The input field at this index became active.
    InputField(usize),
    /// Select tool result: topmost widget under the pointer, if any.
    Selected(Option<usize>),
    /// A widget was created at this index.
    Created(usize),
}

/// An HMI editing session.
pub struct Editor<P: ToolSource = Palette> {
    store: VariableStore,
    palette: P,
    widgets: Vec<Widget>,
    selected: Option<usize>,
    object_count: i32,
    workspace: Rect,
    image_path: PathBuf,
    closed: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create a session with the standard palette.
    pub fn new(config: EditorConfig) -> Self {
        let palette = Palette::new(config.palette_width);
        Self::with_palette(palette, config)
    }
}

impl<P: ToolSource> Editor<P> {
    /// Create a session with a custom tool source.
    pub fn with_palette(palette: P, config: EditorConfig) -> Self {
        let EditorConfig {
            canvas_size,
            palette_width,
            image_path,
            demo_screen,
            variables,
        } = config;

        let mut editor = Self {
            store: VariableStore::new(),
            palette,
            widgets: Vec::new(),
            selected: None,
            object_count: 0,
            workspace: Rect::new(palette_width, 0.0, canvas_size.width, canvas_size.height),
            image_path,
            closed: false,
        };
        for (name, value) in variables {
            editor.store.set(name, value);
        }
        if demo_screen {
            editor.build_demo_screen();
        }
        editor
    }

    /// Configured values win over the demo's initial sensor reading.
    fn build_demo_screen(&mut self) {
        if !self.store.has(SENSOR_VAR) {
            self.store.set(SENSOR_VAR, 50.0f32);
        }

        self.widgets.push(
            Widget::new(WidgetTag::Text, "sensor_text")
                .with_position(Point::new(250.0, 50.0))
                .with_size(Size::new(200.0, 30.0))
                .with_text("Sensor Value: ")
                .with_binding(SENSOR_VAR),
        );

        let mut button = Widget::new(WidgetTag::Button, "sensor_button")
            .with_position(Point::new(250.0, 100.0))
            .with_size(Size::new(150.0, 40.0))
            .with_text("Random Sensor");
        button.kind = WidgetKind::Button(Button::new(random_sensor_action()));
        self.widgets.push(button);

        let mut graph = Widget::new(WidgetTag::HistoryChart, "sensor_graph")
            .with_position(Point::new(250.0, 200.0))
            .with_size(Size::new(400.0, 200.0))
            .with_binding(SENSOR_VAR);
        if let Some(chart) = graph.as_history_chart_mut() {
            chart.add_sample(50.0);
        }
        self.widgets.push(graph);
    }

    fn next_id(&self, tag: WidgetTag) -> String {
        format!("{}_{}", tag.id_prefix(), self.widgets.len())
    }

    /// Append a widget built from explicit geometry and return its index.
    ///
    /// `content` becomes the display text. A line spans from `position` to
    /// `position + size`.
    pub fn create_widget(
        &mut self,
        tag: WidgetTag,
        position: Point,
        size: Size,
        content: Option<String>,
    ) -> usize {
        let id = self.next_id(tag);
        let mut widget = match tag {
            WidgetTag::FreeLine => Widget::free_line(id, position, position + size.to_vec2()),
            _ => Widget::new(tag, id).with_position(position).with_size(size),
        };
        if let Some(content) = content {
            widget.text = content;
        }
        self.push_widget(widget)
    }

    /// Append an already built widget and return its index.
    pub fn push_widget(&mut self, widget: Widget) -> usize {
        log::info!("created {:?} widget {}", widget.tag(), widget.id());
        self.widgets.push(widget);
        self.widgets.len() - 1
    }

    /// Widget the tool creates at `at`, or `None` for non-creating tools.
    fn tool_widget(&self, tool: ToolKind, at: Point) -> Option<Widget> {
        let tag = tool.creates()?;
        let id = self.next_id(tag);
        let widget = match tag {
            WidgetTag::Shape => Widget::new(tag, id)
                .with_position(at)
                .with_size(Size::new(100.0, 60.0))
                .with_color(Rgba8::random()),
            WidgetTag::FreeLine => Widget::free_line(id, at, at + Vec2::new(100.0, 100.0)),
            WidgetTag::Polyline => {
                let mut widget = Widget::new(tag, id)
                    .with_position(at)
                    .with_size(Size::new(200.0, 150.0));
                widget.kind = WidgetKind::Polyline(Polyline::from_points(vec![
                    Point::new(0.0, 0.0),
                    Point::new(50.0, 100.0),
                    Point::new(100.0, 50.0),
                    Point::new(150.0, 100.0),
                    Point::new(200.0, 0.0),
                ]));
                widget
            }
            WidgetTag::Text => Widget::new(tag, id)
                .with_position(at)
                .with_size(Size::new(200.0, 30.0))
                .with_text("Sensor: ")
                .with_binding(SENSOR_VAR),
            WidgetTag::Button => {
                let mut widget = Widget::new(tag, id)
                    .with_position(at)
                    .with_size(Size::new(120.0, 40.0))
                    .with_text("Random Sensor");
                widget.kind = WidgetKind::Button(Button::new(random_sensor_action()));
                widget
            }
            WidgetTag::InputField => {
                let mut widget = Widget::new(tag, id)
                    .with_position(at)
                    .with_size(Size::new(200.0, 30.0));
                if let Some(field) = widget.as_input_field_mut() {
                    field.set_active(true);
                }
                widget
            }
            WidgetTag::HistoryChart => {
                let mut widget = Widget::new(tag, id)
                    .with_position(at)
                    .with_size(Size::new(300.0, 150.0))
                    .with_binding(SENSOR_VAR);
                let mut chart = HistoryChart::default();
                chart.add_sample(50.0);
                widget.kind = WidgetKind::HistoryChart(chart);
                widget
            }
            WidgetTag::Image => {
                let mut widget = Widget::new(tag, id)
                    .with_position(at)
                    .with_size(Size::new(200.0, 150.0));
                if let Some(image) = widget.as_image_mut() {
                    if let Err(err) = image.load_from_file(&self.image_path) {
                        log::warn!(
                            "failed to load image {}: {err}",
                            self.image_path.display()
                        );
                    }
                }
                widget
            }
        };
        Some(widget)
    }

    /// Route a pointer press.
    ///
    /// Palette first; otherwise every input field loses focus, then buttons
    /// and input fields are tested in creation order, and only if neither
    /// takes the press does the current tool apply.
    pub fn dispatch_pointer_down(&mut self, point: Point) -> ClickOutcome {
        if self.palette.contains(point) {
            let tool = self.palette.handle_click(point);
            return ClickOutcome::Palette(tool);
        }

        for field in self.widgets.iter_mut().filter_map(Widget::as_input_field_mut) {
            field.set_active(false);
        }

        if let Some(index) = self
            .widgets
            .iter()
            .position(|w| w.tag() == WidgetTag::Button && w.hit_test(point))
        {
            log::debug!("button {} clicked", self.widgets[index].id());
            if let Some(button) = self.widgets[index].as_button_mut() {
                button.activate(&mut self.store);
            }
            return ClickOutcome::Button(index);
        }

        if let Some(index) = self
            .widgets
            .iter()
            .position(|w| w.tag() == WidgetTag::InputField && w.hit_test(point))
        {
            log::debug!("input field {} focused", self.widgets[index].id());
            if let Some(field) = self.widgets[index].as_input_field_mut() {
                field.set_active(true);
            }
            return ClickOutcome::InputField(index);
        }

        let tool = self.palette.current_tool();
        match self.tool_widget(tool, point) {
            None => {
                self.selected = self.widgets.iter().rposition(|w| w.hit_test(point));
                log::debug!("selection: {:?}", self.selected);
                ClickOutcome::Selected(self.selected)
            }
            Some(widget) => {
                let index = self.push_widget(widget);
                self.object_count += 1;
                self.store.set(OBJECT_COUNT_VAR, self.object_count);
                log::info!("total objects: {}", self.object_count);
                ClickOutcome::Created(index)
            }
        }
    }

    /// Forward a typed character to every active input field.
    pub fn dispatch_keystroke(&mut self, code: u32) {
        for field in self.widgets.iter_mut().filter_map(Widget::as_input_field_mut) {
            if field.is_active() {
                field.handle_character(code);
            }
        }
    }

    /// Route a shell event. Returns the click outcome for left-button presses.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ClickOutcome> {
        match event {
            InputEvent::PointerDown {
                position,
                button: MouseButton::Left,
            } => Some(self.dispatch_pointer_down(position)),
            InputEvent::PointerDown { .. } => None,
            InputEvent::Text { code } => {
                self.dispatch_keystroke(code);
                None
            }
            InputEvent::CloseRequested => {
                log::info!("close requested");
                self.closed = true;
                None
            }
        }
    }

    /// Let every widget pull its bound variable.
    pub fn refresh(&mut self) {
        for widget in &mut self.widgets {
            widget.refresh(&self.store);
        }
    }

    /// Draw workspace, widgets (in creation order) and palette.
    pub fn render(&self) -> Scene {
        let mut scene = Scene::new();
        scene.fill_rect(
            self.workspace,
            WORKSPACE_COLOR,
            Some(Outline::new(WORKSPACE_BORDER, 2.0)),
        );
        for widget in &self.widgets {
            widget.render(&mut scene);
        }
        self.palette.render(&mut scene);
        scene
    }

    /// One frame: refresh, then render.
    pub fn tick(&mut self) -> Scene {
        self.refresh();
        self.render()
    }

    /// Load an image file into the image widget at `index`.
    ///
    /// Returns whether the widget now shows the file.
    pub fn load_image(&mut self, index: usize, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let Some(image) = self.widgets.get_mut(index).and_then(Widget::as_image_mut) else {
            return false;
        };
        match image.load_from_file(path) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to load image {}: {err}", path.display());
                false
            }
        }
    }

    /// Widgets in creation order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn widget(&self, index: usize) -> Option<&Widget> {
        self.widgets.get(index)
    }

    pub fn widget_mut(&mut self, index: usize) -> Option<&mut Widget> {
        self.widgets.get_mut(index)
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VariableStore {
        &mut self.store
    }

    pub fn palette(&self) -> &P {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut P {
        &mut self.palette
    }

    /// Widget chosen by the last Select-tool click.
    pub fn selected(&self) -> Option<&Widget> {
        self.selected.and_then(|i| self.widgets.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Widgets created with palette tools so far.
    pub fn object_count(&self) -> i32 {
        self.object_count
    }

    /// Index of the first active input field.
    pub fn active_input(&self) -> Option<usize> {
        self.widgets
            .iter()
            .position(|w| w.as_input_field().is_some_and(|f| f.is_active()))
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

fn random_sensor_action() -> ButtonAction {
    ButtonAction::RandomFloat {
        name: SENSOR_VAR.to_string(),
        min: 20,
        max: 80,
    }
}
