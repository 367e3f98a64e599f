//! HMI Kit application shell.
//!
//! Drives an editor session with a sequence of input events, one frame per
//! event, and reports the final frame as JSON.

use hmikit_core::tools::ToolKind;
use hmikit_core::{ConfigError, Editor, EditorConfig, InputEvent, Scene, Value, Widget};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Output error: {0}")]
    Output(String),
}

/// Snapshot of the session after the last event.
#[derive(Debug, Serialize)]
pub struct FrameReport<'a> {
    pub frames: usize,
    pub object_count: i32,
    pub variables: BTreeMap<&'a str, &'a Value>,
    pub widgets: &'a [Widget],
    pub scene: &'a Scene,
}

/// Headless application.
pub struct App {
    editor: Editor,
    last_scene: Scene,
    frames: usize,
}

impl App {
    pub fn new(config: EditorConfig) -> Self {
        let mut editor = Editor::new(config);
        let last_scene = editor.tick();
        Self {
            editor,
            last_scene,
            frames: 1,
        }
    }

    /// Feed events until they run out or the session is closed, rendering a
    /// frame after each one.
    pub fn run(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            if self.editor.is_closed() {
                break;
            }
            if let Some(outcome) = self.editor.handle_event(event) {
                log::debug!("click outcome: {:?}", outcome);
            }
            self.last_scene = self.editor.tick();
            self.frames += 1;
        }
        log::info!(
            "session ended after {} frames with {} widgets",
            self.frames,
            self.editor.widgets().len()
        );
    }

    /// Scripted session: build a small tank screen and exercise it.
    pub fn demo_script(&self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let pick = |events: &mut Vec<InputEvent>, tool: ToolKind| {
            if let Some(rect) = self.editor.palette().button_rect(tool) {
                let c = rect.center();
                events.push(InputEvent::click(c.x, c.y));
            }
        };

        pick(&mut events, ToolKind::Rectangle);
        events.push(InputEvent::click(700.0, 60.0));
        pick(&mut events, ToolKind::Button);
        events.push(InputEvent::click(700.0, 200.0));
        pick(&mut events, ToolKind::InputField);
        events.push(InputEvent::click(700.0, 300.0));
        events.extend(InputEvent::typed("Tank 1"));
        pick(&mut events, ToolKind::Select);
        events.push(InputEvent::click(710.0, 210.0));
        events.push(InputEvent::click(260.0, 110.0));
        events.push(InputEvent::click(720.0, 80.0));
        events.push(InputEvent::CloseRequested);
        events
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn report(&self) -> FrameReport<'_> {
        let store = self.editor.store();
        let variables = store
            .names()
            .into_iter()
            .filter_map(|name| store.get_ref(name).map(|value| (name, value)))
            .collect();
        FrameReport {
            frames: self.frames,
            object_count: self.editor.object_count(),
            variables,
            widgets: self.editor.widgets(),
            scene: &self.last_scene,
        }
    }

    /// Final frame as pretty-printed JSON.
    pub fn report_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(&self.report()).map_err(|e| AppError::Output(e.to_string()))
    }
}
