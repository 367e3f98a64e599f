//! Rolling bar chart of recent samples.

use crate::scene::{Outline, Rgba8, Scene};
use kurbo::Rect;
use serde::Serialize;
use std::collections::VecDeque;

/// Number of samples kept; older ones are evicted first.
pub const HISTORY_CAPACITY: usize = 20;

const INITIAL_MAX: f32 = 100.0;
const HEADROOM: f32 = 1.1;
const BACKGROUND: Rgba8 = Rgba8::rgb(240, 240, 240);
const BORDER: Rgba8 = Rgba8::rgb(180, 180, 180);

/// Sample history with a vertical scale that only grows.
///
/// A sample above the current scale raises it to the sample plus 10%
/// headroom. The scale is never lowered, so a past peak keeps compressing
/// later, smaller samples.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryChart {
    samples: VecDeque<f32>,
    max_value: f32,
}

impl Default for HistoryChart {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
            max_value: INITIAL_MAX,
        }
    }
}

impl HistoryChart {
    pub fn add_sample(&mut self, value: f32) {
        self.samples.push_back(value);
        if self.samples.len() > HISTORY_CAPACITY {
            self.samples.pop_front();
        }
        if value > self.max_value {
            self.max_value = value * HEADROOM;
        }
    }

    /// Samples from oldest to newest.
    pub fn samples(&self) -> impl Iterator<Item = &f32> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Current vertical scale.
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub(crate) fn render(&self, bounds: Rect, color: Rgba8, scene: &mut Scene) {
        scene.fill_rect(bounds, BACKGROUND, Some(Outline::new(BORDER, 2.0)));
        if self.samples.is_empty() {
            return;
        }

        let slot = bounds.width() / self.samples.len() as f64;
        for (i, &value) in self.samples.iter().enumerate() {
            let height = f64::from(value / self.max_value) * bounds.height();
            let x0 = bounds.x0 + i as f64 * slot;
            let y0 = bounds.y1 - height;
            scene.fill_rect(Rect::new(x0, y0, x0 + slot - 2.0, bounds.y1), color, None);
        }
    }
}
