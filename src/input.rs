//! Player intent.
//!
//! Device handlers only ever write into a [`ControlState`].  At the start of
//! each frame the driver resolves it into an [`Intent`], which is the only
//! thing the simulation reads.  Keyboard direction beats an active drag.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
    #[default]
    None,
}

/// Resolved input for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intent {
    pub horizontal: Horizontal,
    pub fire: bool,
    /// Desired left edge of the player while a drag is active.
    pub drag_target: Option<f32>,
}

impl Intent {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn left() -> Self {
        Self {
            horizontal: Horizontal::Left,
            ..Self::default()
        }
    }

    pub fn right() -> Self {
        Self {
            horizontal: Horizontal::Right,
            ..Self::default()
        }
    }

    pub fn fire() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }

    pub fn drag_to(target_x: f32) -> Self {
        Self {
            drag_target: Some(target_x),
            ..Self::default()
        }
    }
}

/// Raw device state shared between the input handlers and the frame loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Set while the pointer is held down; the value is the desired left
    /// edge of the player in world pixels.
    pub drag_target: Option<f32>,
}

impl ControlState {
    pub fn begin_drag(&mut self, target_x: f32) {
        self.drag_target = Some(target_x);
    }

    pub fn end_drag(&mut self) {
        self.drag_target = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Left wins when both directions are held, matching the order the
    /// keys are checked in.
    pub fn intent(&self) -> Intent {
        let horizontal = if self.left {
            Horizontal::Left
        } else if self.right {
            Horizontal::Right
        } else {
            Horizontal::None
        };
        let drag_target = match horizontal {
            Horizontal::None => self.drag_target,
            _ => None,
        };
        Intent {
            horizontal,
            fire: self.fire,
            drag_target,
        }
    }
}
