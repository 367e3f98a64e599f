//! Push button with an attached store command.

use crate::scene::Rgba8;
use crate::variables::{Value, VariableStore};
use serde::{Deserialize, Serialize};

/// Command a button runs against the variable store when clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ButtonAction {
    /// Write a fixed value.
    Set { name: String, value: Value },
    /// Flip a boolean. A missing or non-boolean variable becomes `true`.
    Toggle { name: String },
    /// Add `step` to an integer. A missing or non-integer variable counts as 0.
    Increment { name: String, step: i32 },
    /// Write a random whole-number float in `[min, max)`.
    RandomFloat { name: String, min: i32, max: i32 },
}

impl ButtonAction {
    /// Run the command against `store`.
    pub fn run(&self, store: &mut VariableStore) {
        match self {
            ButtonAction::Set { name, value } => store.set(name.as_str(), value.clone()),
            ButtonAction::Toggle { name } => {
                let current = store.get_as::<bool>(name).unwrap_or(false);
                store.set(name.as_str(), !current);
            }
            ButtonAction::Increment { name, step } => {
                let current = store.get_as::<i32>(name).unwrap_or(0);
                store.set(name.as_str(), current.wrapping_add(*step));
            }
            ButtonAction::RandomFloat { name, min, max } => {
                let value = if min < max {
                    rand::random_range(*min..*max) as f32
                } else {
                    *min as f32
                };
                log::info!("{name}: {value}");
                store.set(name.as_str(), value);
            }
        }
    }
}

/// Button state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Button {
    action: Option<ButtonAction>,
    pressed: bool,
}

impl Button {
    pub const PRESSED_COLOR: Rgba8 = Rgba8::rgb(80, 130, 180);
    pub const LABEL_SIZE: f64 = 16.0;

    pub fn new(action: ButtonAction) -> Self {
        Self {
            action: Some(action),
            pressed: false,
        }
    }

    pub fn set_action(&mut self, action: Option<ButtonAction>) {
        self.action = action;
    }

    pub fn action(&self) -> Option<&ButtonAction> {
        self.action.as_ref()
    }

    /// Toggle the pressed flag, then run the attached action.
    pub fn activate(&mut self, store: &mut VariableStore) {
        self.pressed = !self.pressed;
        if let Some(action) = &self.action {
            action.run(store);
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}
