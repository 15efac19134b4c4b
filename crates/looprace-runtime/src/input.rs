//! Per-frame input snapshot

use looprace_track::Lane;

/// Player intent for a single update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Lane to follow; the centreline when nothing is held.
    pub steer: Lane,
    /// Switch between chase and cockpit camera this frame.
    pub toggle_camera: bool,
}

impl FrameInput {
    pub fn steering(steer: Lane) -> Self {
        Self {
            steer,
            toggle_camera: false,
        }
    }

    /// Build input from held steering keys. Left wins when both are held.
    pub fn from_keys(left_held: bool, right_held: bool, toggle_camera: bool) -> Self {
        let steer = if left_held {
            Lane::Left
        } else if right_held {
            Lane::Right
        } else {
            Lane::Centre
        };
        Self {
            steer,
            toggle_camera,
        }
    }
}
