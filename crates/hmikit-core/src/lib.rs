//! HMI Kit Core Library
//!
//! Variable store, widgets and input routing for the HMI screen editor.
//! Rendering produces a backend-neutral display list.

pub mod config;
pub mod editor;
pub mod error;
pub mod input;
pub mod scene;
pub mod tools;
pub mod variables;
pub mod widgets;

pub use config::EditorConfig;
pub use editor::{ClickOutcome, Editor, OBJECT_COUNT_VAR, SENSOR_VAR};
pub use error::{ConfigError, ImageLoadError};
pub use input::{InputEvent, MouseButton};
pub use scene::{Primitive, Rgba8, Scene};
pub use tools::{Palette, ToolKind, ToolSource};
pub use variables::{FromValue, Subscriber, Value, VariableStore};
pub use widgets::{Widget, WidgetKind, WidgetTag};
