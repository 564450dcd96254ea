use bevy::prelude::*;
use constants::particles::SCATTER_STEP;

use crate::engine::interaction::panel::PanelId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScatterDirection {
    #[default]
    Out,
    In,
}

/// Scatter-out / scatter-in state machine for the reassembled words.
///
/// While active it overrides every other position update. Scatter-out
/// ends holding at full progress until the panel closes; scatter-in ends
/// inactive at zero.
#[derive(Resource, Debug, Clone, Default)]
pub struct TextScatter {
    active: bool,
    direction: ScatterDirection,
    progress: f32,
    pending_panel: Option<PanelId>,
}

impl TextScatter {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn direction(&self) -> ScatterDirection {
        self.direction
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Eased progress used to scale scatter vectors.
    pub fn eased(&self) -> f32 {
        ease_in_out(self.progress)
    }

    /// Start scattering the words away and remember which panel to open.
    pub fn scatter_out(&mut self, panel: PanelId) {
        self.active = true;
        self.direction = ScatterDirection::Out;
        self.progress = 0.0;
        self.pending_panel = Some(panel);
    }

    /// Start pulling the words back together after a panel closes.
    pub fn scatter_in(&mut self) {
        self.active = true;
        self.direction = ScatterDirection::In;
        self.pending_panel = None;
    }

    /// Advance one frame. Returns the panel to open on the frame scatter-out
    /// completes, and never again for the same trigger.
    pub fn step(&mut self) -> Option<PanelId> {
        if !self.active {
            return None;
        }

        match self.direction {
            ScatterDirection::Out => {
                self.progress = (self.progress + SCATTER_STEP).min(1.0);
                if self.progress >= 1.0 {
                    return self.pending_panel.take();
                }
            }
            ScatterDirection::In => {
                self.progress = (self.progress - SCATTER_STEP).max(0.0);
                if self.progress <= 0.0 {
                    self.active = false;
                }
            }
        }
        None
    }
}

/// Quadratic ease in, quadratic ease out.
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}
