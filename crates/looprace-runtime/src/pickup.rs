//! Pickups placed along the track lanes

use crate::config::SessionConfig;
use looprace_core::Vec3;
use looprace_track::{Lane, Track};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickupKind {
    Pyramid,
    Cube,
    Sphere,
    HealthPack,
}

impl PickupKind {
    /// Kinds that can be the pick-up target.
    pub const COLLECTABLE: [PickupKind; 3] =
        [PickupKind::Pyramid, PickupKind::Cube, PickupKind::Sphere];

    pub fn name(&self) -> &'static str {
        match self {
            PickupKind::Pyramid => "Pyramid",
            PickupKind::Cube => "Cube",
            PickupKind::Sphere => "Sphere",
            PickupKind::HealthPack => "Health pack",
        }
    }

    /// Lane the kind is laid out on.
    pub fn lane(&self) -> Lane {
        match self {
            PickupKind::Sphere => Lane::Right,
            PickupKind::Cube => Lane::Left,
            PickupKind::Pyramid | PickupKind::HealthPack => Lane::Centre,
        }
    }

    pub fn is_collectable(&self) -> bool {
        !matches!(self, PickupKind::HealthPack)
    }
}

impl fmt::Display for PickupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub position: Vec3,
    /// Inactive pickups are neither drawn nor collided with.
    pub active: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, position: Vec3) -> Self {
        Self {
            kind,
            position,
            active: true,
        }
    }

    pub fn touches(&self, position: Vec3, radius: f32) -> bool {
        self.position.distance(&position) < radius
    }
}

/// Lay out every pickup for a track.
///
/// Spheres go on the right lane, cubes on the left lane and pyramids on the
/// centreline, one on every `pickup_spacing`-th point (skipping point 0,
/// where the race starts). Health packs sit on the centreline
/// `health_pack_offset` points past every `health_pack_spacing`-th point.
pub fn place_pickups(track: &Track, config: &SessionConfig) -> Vec<Pickup> {
    let mut pickups = Vec::new();

    for kind in [PickupKind::Sphere, PickupKind::Cube, PickupKind::Pyramid] {
        let points = track.lane_points(kind.lane());
        pickups.extend(
            points
                .iter()
                .enumerate()
                .skip(1)
                .filter(|(i, _)| i % config.pickup_spacing == 0)
                .map(|(_, &p)| Pickup::new(kind, p)),
        );
    }

    let centre = track.centreline_points();
    pickups.extend(
        (0..centre.len())
            .step_by(config.health_pack_spacing)
            .filter_map(|i| centre.get(i + config.health_pack_offset))
            .map(|&p| Pickup::new(PickupKind::HealthPack, p)),
    );

    log::debug!("Placed {} pickups", pickups.len());
    pickups
}

#[cfg(test)]
mod tests {
    use super::*;
    use looprace_track::TrackConfig;

    #[test]
    fn default_track_layout() {
        let track = Track::build(&TrackConfig::default()).unwrap();
        let pickups = place_pickups(&track, &SessionConfig::default());

        let count = |kind| pickups.iter().filter(|p| p.kind == kind).count();
        // Points 50, 100, ..., 450 on each lane
        assert_eq!(count(PickupKind::Sphere), 9);
        assert_eq!(count(PickupKind::Cube), 9);
        assert_eq!(count(PickupKind::Pyramid), 9);
        // Slots 0 and 250, shifted to 36 and 286
        assert_eq!(count(PickupKind::HealthPack), 2);
        assert!(pickups.iter().all(|p| p.active));

        let first_pack = pickups
            .iter()
            .find(|p| p.kind == PickupKind::HealthPack)
            .unwrap();
        assert_eq!(first_pack.position, track.centreline_points()[36]);
    }

    #[test]
    fn kinds_follow_their_lanes() {
        let track = Track::build(&TrackConfig::default()).unwrap();
        let pickups = place_pickups(&track, &SessionConfig::default());
        let sphere = pickups
            .iter()
            .find(|p| p.kind == PickupKind::Sphere)
            .unwrap();
        assert_eq!(sphere.position, track.right_lane()[50]);
        let cube = pickups.iter().find(|p| p.kind == PickupKind::Cube).unwrap();
        assert_eq!(cube.position, track.left_lane()[50]);
    }

    #[test]
    fn health_packs_past_the_end_are_skipped() {
        let track = Track::build(&TrackConfig::default()).unwrap();
        let config = SessionConfig {
            health_pack_offset: 480,
            ..SessionConfig::default()
        };
        let packs = place_pickups(&track, &config)
            .into_iter()
            .filter(|p| p.kind == PickupKind::HealthPack)
            .count();
        // Slot 0 lands on 480; slot 250 would be 730
        assert_eq!(packs, 1);
    }

    #[test]
    fn touch_uses_strict_radius() {
        let p = Pickup::new(PickupKind::Cube, Vec3::ZERO);
        assert!(p.touches(Vec3::new(4.9, 0.0, 0.0), 5.0));
        assert!(!p.touches(Vec3::new(5.0, 0.0, 0.0), 5.0));
    }

    #[test]
    fn only_shapes_are_collectable() {
        assert!(PickupKind::COLLECTABLE.iter().all(|k| k.is_collectable()));
        assert!(!PickupKind::HealthPack.is_collectable());
        assert_eq!(PickupKind::Sphere.to_string(), "Sphere");
    }
}
