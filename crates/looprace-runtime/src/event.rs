//! Race events

use crate::pickup::PickupKind;

/// Something that happened during a race update, for audio cues and UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RaceEvent {
    /// The target kind was collected; `next` is the new target.
    PickupCollected { kind: PickupKind, next: PickupKind },
    /// The ship touched an active pickup that was not the target.
    WrongPickup { kind: PickupKind, health: i32 },
    HealthRestored { health: i32 },
    LapStarted { lap: i32 },
    PickupsRespawned,
    GameOver { points: u32, laps: i32 },
}
