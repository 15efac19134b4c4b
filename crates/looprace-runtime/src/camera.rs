//! Camera placement relative to the ship's frame of travel

use looprace_core::{Frame, Vec3};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CameraMode {
    /// Behind and above the ship.
    #[default]
    ThirdPerson,
    /// Just above the ship, looking down the track.
    FirstPerson,
    /// High overhead; used once the race is over.
    TopDown,
}

/// Look-at parameters for a view matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl CameraView {
    /// View for `mode` around a ship at `position` travelling along `frame`.
    pub fn look(mode: CameraMode, position: Vec3, frame: &Frame) -> Self {
        let t = frame.tangent;
        let b = frame.binormal;
        let (eye, target) = match mode {
            CameraMode::ThirdPerson => (position - t * 30.0 + b * 20.0, position + t * 40.0),
            CameraMode::FirstPerson => (position + Vec3::new(0.0, 10.0, 0.0), position + t * 30.0),
            CameraMode::TopDown => (position - t + b * 200.0, position + t * 2.0),
        };
        Self {
            eye,
            target,
            up: Vec3::UP,
        }
    }
}

/// Follows the ship and remembers which view the player picked.
#[derive(Debug, Clone)]
pub struct CameraRig {
    mode: CameraMode,
    view: CameraView,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraRig {
    pub fn new() -> Self {
        Self {
            mode: CameraMode::ThirdPerson,
            view: CameraView {
                eye: Vec3::ZERO,
                target: Vec3::ZERO,
                up: Vec3::UP,
            },
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn view(&self) -> &CameraView {
        &self.view
    }

    /// Swap chase and cockpit views. Has no effect on the overhead view.
    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            CameraMode::ThirdPerson => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
            CameraMode::TopDown => CameraMode::TopDown,
        };
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
    }

    pub fn follow(&mut self, position: Vec3, frame: &Frame) {
        self.view = CameraView::look(self.mode, position, frame);
    }
}
