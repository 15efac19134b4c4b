//! Looprace Runtime - race simulation on a built track
//!
//! - `GameClock` / `FrameRateCounter` - fixed-timestep accumulator and FPS counter
//! - `FrameInput` - per-frame steering and camera input
//! - `RaceSession` - ship movement, laps, pickups, health and game over
//! - `CameraRig` - chase, cockpit and overhead views
//! - `RaceEvent` / `EventBus` - queue of things that happened during an update
//! - `Hud` - overlay text for a session

mod camera;
mod clock;
mod config;
mod event;
mod event_bus;
mod hud;
mod input;
mod pickup;
mod session;

pub use camera::{CameraMode, CameraRig, CameraView};
pub use clock::{FrameRateCounter, GameClock};
pub use config::SessionConfig;
pub use event::RaceEvent;
pub use event_bus::EventBus;
pub use hud::Hud;
pub use input::FrameInput;
pub use pickup::{place_pickups, Pickup, PickupKind};
pub use session::RaceSession;
