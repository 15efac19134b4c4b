//! Race session: ship movement, lap tracking, pickups and health

use crate::camera::{CameraMode, CameraRig};
use crate::clock::FrameRateCounter;
use crate::config::SessionConfig;
use crate::event::RaceEvent;
use crate::event_bus::EventBus;
use crate::input::FrameInput;
use crate::pickup::{place_pickups, Pickup, PickupKind};
use looprace_core::{Frame, Result, Vec3};
use looprace_track::{Lane, Track};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// All state of one race around a track.
///
/// The session owns its track and is advanced by [`RaceSession::update`]
/// with the frame time in milliseconds.
pub struct RaceSession {
    track: Track,
    config: SessionConfig,
    rng: StdRng,
    pickups: Vec<Pickup>,
    /// Distance travelled along the centreline, never wrapped.
    distance: f32,
    /// Lap shown on the HUD; 0 once the race is over.
    lap: i32,
    laps_completed: i32,
    health: i32,
    points: u32,
    target: PickupKind,
    game_over: bool,
    ship_position: Vec3,
    ship_frame: Frame,
    /// Pickup spin angle in radians.
    spin: f32,
    camera: CameraRig,
    events: EventBus,
    fps: FrameRateCounter,
}

fn random_target(rng: &mut StdRng) -> PickupKind {
    PickupKind::COLLECTABLE[rng.random_range(0..PickupKind::COLLECTABLE.len())]
}

impl RaceSession {
    pub fn new(track: Track, config: SessionConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let target = random_target(&mut rng);
        let pickups = place_pickups(&track, &config);
        let (ship_position, ship_frame) = track.frame_at(0.0, Lane::Centre, config.lookahead)?;

        let mut camera = CameraRig::new();
        camera.follow(ship_position, &ship_frame);

        log::info!(
            "Race session ready: {} pickups, first target {}",
            pickups.len(),
            target
        );

        Ok(Self {
            health: config.max_health,
            track,
            config,
            rng,
            pickups,
            distance: 0.0,
            lap: 0,
            laps_completed: 0,
            points: 0,
            target,
            game_over: false,
            ship_position,
            ship_frame,
            spin: 0.0,
            camera,
            events: EventBus::new(),
            fps: FrameRateCounter::new(),
        })
    }

    /// Advance the race by `dt_ms` milliseconds.
    pub fn update(&mut self, dt_ms: f32, input: &FrameInput) {
        let dt = dt_ms.max(0.0);

        let mut speed = self.config.base_speed;
        if self.lap >= 1 {
            speed += self.config.lap_speed_bonus;
        }
        self.distance += dt * speed;
        self.spin += self.config.spin_rate * dt;

        self.move_ship(input.steer);

        if input.toggle_camera && !self.game_over {
            self.camera.toggle();
        }
        self.camera.follow(self.ship_position, &self.ship_frame);

        self.update_lap();
        if !self.game_over {
            self.collide();
            self.check_game_over();
        }
    }

    /// Count one presented frame that took `dt_ms` milliseconds.
    ///
    /// Called once per rendered frame, however many fixed updates it ran.
    pub fn record_frame(&mut self, dt_ms: f64) {
        self.fps.record(dt_ms);
    }

    fn move_ship(&mut self, steer: Lane) {
        let lane = if self.game_over { Lane::Centre } else { steer };
        match self
            .track
            .frame_at(self.distance, lane, self.config.lookahead)
        {
            Ok((position, frame)) => {
                self.ship_position = position;
                self.ship_frame = frame;
            }
            Err(e) if e.is_sampling_failure() => {
                log::warn!(
                    "Failed to sample {} lane at distance {}: {}",
                    lane,
                    self.distance,
                    e
                );
            }
            Err(e) => {
                log::error!("Ship could not move at distance {}: {}", self.distance, e);
            }
        }
    }

    fn update_lap(&mut self) {
        if self.game_over {
            self.lap = 0;
            return;
        }
        if !self.distance.is_finite() {
            return;
        }

        let lap = self.track.current_lap(self.distance);
        if lap > self.lap {
            log::info!("Lap {} started", lap);
            self.events.push(RaceEvent::LapStarted { lap });
        }
        self.lap = lap;

        let radius = self.config.pickup_radius;
        let near_finish = [Lane::Centre, Lane::Left, Lane::Right]
            .iter()
            .filter_map(|&lane| self.track.lane_points(lane).last())
            .any(|last| last.distance(&self.ship_position) < radius);
        if near_finish {
            self.respawn_pickups();
        }
    }

    /// Reactivate every collectable. Health packs stay consumed.
    fn respawn_pickups(&mut self) {
        let mut respawned = false;
        for pickup in self
            .pickups
            .iter_mut()
            .filter(|p| p.kind.is_collectable() && !p.active)
        {
            pickup.active = true;
            respawned = true;
        }
        if respawned {
            log::debug!("Pickups respawned at distance {}", self.distance);
            self.events.push(RaceEvent::PickupsRespawned);
        }
    }

    fn collide(&mut self) {
        let position = self.ship_position;
        let radius = self.config.pickup_radius;

        for pickup in self
            .pickups
            .iter_mut()
            .filter(|p| p.active && p.touches(position, radius))
        {
            if pickup.kind == PickupKind::HealthPack {
                if self.health < self.config.max_health {
                    pickup.active = false;
                    self.health =
                        (self.health + self.config.health_pack_heal).min(self.config.max_health);
                    self.events.push(RaceEvent::HealthRestored {
                        health: self.health,
                    });
                }
            } else if pickup.kind == self.target {
                pickup.active = false;
                self.points += 1;
                self.target = random_target(&mut self.rng);
                self.events.push(RaceEvent::PickupCollected {
                    kind: pickup.kind,
                    next: self.target,
                });
            } else {
                self.health -= self.config.wrong_pickup_damage;
                self.events.push(RaceEvent::WrongPickup {
                    kind: pickup.kind,
                    health: self.health,
                });
            }
        }

        self.health = self.health.clamp(0, self.config.max_health);
    }

    fn check_game_over(&mut self) {
        if self.health > 0 {
            return;
        }

        self.game_over = true;
        self.laps_completed = self.lap;
        self.lap = 0;
        for pack in self
            .pickups
            .iter_mut()
            .filter(|p| p.kind == PickupKind::HealthPack)
        {
            pack.active = false;
        }
        self.camera.set_mode(CameraMode::TopDown);
        self.camera.follow(self.ship_position, &self.ship_frame);

        log::info!(
            "Game over with {} points after {} laps",
            self.points,
            self.laps_completed
        );
        self.events.push(RaceEvent::GameOver {
            points: self.points,
            laps: self.laps_completed,
        });
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn lap(&self) -> i32 {
        self.lap
    }

    /// Laps finished when the race ended, or so far while it runs.
    pub fn laps_completed(&self) -> i32 {
        if self.game_over {
            self.laps_completed
        } else {
            self.lap
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn target(&self) -> PickupKind {
        self.target
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn ship_position(&self) -> Vec3 {
        self.ship_position
    }

    pub fn ship_frame(&self) -> &Frame {
        &self.ship_frame
    }

    /// Model matrix orienting the ship along its direction of travel.
    pub fn ship_matrix(&self) -> [[f32; 4]; 4] {
        self.ship_frame.to_matrix(self.ship_position)
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn frames_per_second(&self) -> u32 {
        self.fps.frames_per_second()
    }

    /// Take the events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<RaceEvent> {
        self.events.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::Hud;
    use looprace_track::TrackConfig;

    fn session() -> RaceSession {
        let track = Track::build(&TrackConfig::default()).unwrap();
        let config = SessionConfig {
            seed: Some(42),
            ..SessionConfig::default()
        };
        RaceSession::new(track, config).unwrap()
    }

    /// Distance the ship reaches after a 10ms update from `s`.
    fn next_distance(s: &RaceSession) -> f32 {
        let bonus = if s.lap >= 1 {
            s.config.lap_speed_bonus
        } else {
            0.0
        };
        s.distance + 10.0 * (s.config.base_speed + bonus)
    }

    /// Put a single pickup exactly where the ship will be after the next update.
    fn pickup_ahead(s: &mut RaceSession, kind: PickupKind) {
        let at = s.track.sample(next_distance(s)).unwrap().position;
        s.pickups = vec![Pickup::new(kind, at)];
    }

    fn other_than(kind: PickupKind) -> PickupKind {
        match kind {
            PickupKind::Cube => PickupKind::Sphere,
            _ => PickupKind::Cube,
        }
    }

    #[test]
    fn starts_at_first_centreline_point() {
        let s = session();
        let start = s.track.centreline_points()[0];
        assert!(s.ship_position().distance(&start) < 1e-3);
        assert_eq!(s.health(), 100);
        assert_eq!(s.points(), 0);
        assert_eq!(s.lap(), 0);
        assert!(s.target().is_collectable());
        assert!(!s.is_game_over());
        assert_eq!(s.camera().mode(), CameraMode::ThirdPerson);
    }

    #[test]
    fn same_seed_same_targets() {
        let a = session();
        let b = session();
        assert_eq!(a.target(), b.target());
    }

    #[test]
    fn distance_follows_base_speed() {
        let mut s = session();
        s.pickups.clear();
        s.update(10.0, &FrameInput::default());
        assert!((s.distance() - 1.0).abs() < 1e-5);
        s.update(-5.0, &FrameInput::default());
        assert!((s.distance() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn lap_bonus_speeds_up_the_ship() {
        let mut s = session();
        s.pickups.clear();
        let total = s.track.total_length();
        s.distance = total + 100.0;
        s.lap = 1;
        s.update(10.0, &FrameInput::default());
        assert!((s.distance() - (total + 101.6)).abs() < 1e-2);
        assert_eq!(s.lap(), 1);
    }

    #[test]
    fn crossing_the_line_starts_a_lap() {
        let mut s = session();
        s.pickups.clear();
        s.distance = s.track.total_length() - 0.5;
        s.update(10.0, &FrameInput::default());
        assert_eq!(s.lap(), 1);
        assert!(s.drain_events().contains(&RaceEvent::LapStarted { lap: 1 }));
    }

    #[test]
    fn steering_follows_object_lanes() {
        let mut s = session();
        s.pickups.clear();
        s.distance = 200.0;
        s.update(10.0, &FrameInput::steering(Lane::Left));
        let expected = s.track.sample_lane(s.distance(), Lane::Left).unwrap();
        assert!(s.ship_position().distance(&expected.position) < 1e-3);

        s.update(10.0, &FrameInput::steering(Lane::Right));
        let expected = s.track.sample_lane(s.distance(), Lane::Right).unwrap();
        assert!(s.ship_position().distance(&expected.position) < 1e-3);
    }

    #[test]
    fn collecting_the_target_scores() {
        let mut s = session();
        let target = s.target();
        pickup_ahead(&mut s, target);
        s.update(10.0, &FrameInput::default());

        assert_eq!(s.points(), 1);
        assert!(!s.pickups()[0].active);
        assert_eq!(s.health(), 100);
        let events = s.drain_events();
        assert!(matches!(
            events.as_slice(),
            [RaceEvent::PickupCollected { kind, .. }] if *kind == target
        ));
    }

    #[test]
    fn wrong_pickup_costs_health_every_frame() {
        let mut s = session();
        let wrong = other_than(s.target());
        pickup_ahead(&mut s, wrong);
        s.update(10.0, &FrameInput::default());

        assert_eq!(s.health(), 99);
        assert_eq!(s.points(), 0);
        assert!(s.pickups()[0].active);

        pickup_ahead(&mut s, wrong);
        s.update(10.0, &FrameInput::default());
        assert_eq!(s.health(), 98);
    }

    #[test]
    fn health_pack_heals_and_clamps() {
        let mut s = session();
        s.health = 50;
        pickup_ahead(&mut s, PickupKind::HealthPack);
        s.update(10.0, &FrameInput::default());
        assert_eq!(s.health(), 60);
        assert!(!s.pickups()[0].active);

        s.health = 95;
        pickup_ahead(&mut s, PickupKind::HealthPack);
        s.update(10.0, &FrameInput::default());
        assert_eq!(s.health(), 100);
    }

    #[test]
    fn health_pack_is_left_at_full_health() {
        let mut s = session();
        pickup_ahead(&mut s, PickupKind::HealthPack);
        s.update(10.0, &FrameInput::default());
        assert_eq!(s.health(), 100);
        assert!(s.pickups()[0].active);
    }

    #[test]
    fn passing_the_finish_respawns_collectables() {
        let mut s = session();
        for pickup in s.pickups.iter_mut() {
            pickup.active = false;
        }
        let m = s.track.centreline().len();
        let last = s.track.centreline().distances()[m - 1];
        s.distance = last - 1.0;
        s.update(10.0, &FrameInput::default());

        assert!(s
            .pickups()
            .iter()
            .all(|p| p.active == p.kind.is_collectable()));
        assert!(s.drain_events().contains(&RaceEvent::PickupsRespawned));
    }

    #[test]
    fn running_out_of_health_ends_the_race() {
        let mut s = session();
        let total = s.track.total_length();
        s.distance = 2.0 * total + 500.0;
        s.lap = 2;
        s.health = 1;
        let wrong = other_than(s.target());
        pickup_ahead(&mut s, wrong);
        s.pickups.push(Pickup::new(PickupKind::HealthPack, Vec3::ZERO));
        s.update(10.0, &FrameInput::default());

        assert!(s.is_game_over());
        assert_eq!(s.health(), 0);
        assert_eq!(s.lap(), 0);
        assert_eq!(s.laps_completed(), 2);
        assert_eq!(s.camera().mode(), CameraMode::TopDown);
        assert!(s
            .pickups()
            .iter()
            .filter(|p| p.kind == PickupKind::HealthPack)
            .all(|p| !p.active));
        assert!(s
            .drain_events()
            .contains(&RaceEvent::GameOver { points: 0, laps: 2 }));
    }

    #[test]
    fn after_game_over_the_ship_keeps_to_the_centre() {
        let mut s = session();
        s.pickups.clear();
        s.health = 0;
        s.game_over = true;
        s.distance = 300.0;
        s.update(10.0, &FrameInput::from_keys(true, false, true));

        let centre = s.track.sample(s.distance()).unwrap().position;
        assert!(s.ship_position().distance(&centre) < 1e-3);
        assert_eq!(s.lap(), 0);
        assert_eq!(s.camera().mode(), CameraMode::ThirdPerson);
    }

    #[test]
    fn failed_sample_keeps_previous_pose() {
        let mut s = session();
        s.pickups.clear();
        s.update(10.0, &FrameInput::default());
        let before = s.ship_position();
        let frame_before = *s.ship_frame();

        s.distance = f32::INFINITY;
        s.update(10.0, &FrameInput::steering(Lane::Left));

        assert_eq!(s.ship_position(), before);
        assert_eq!(*s.ship_frame(), frame_before);
        assert_eq!(s.lap(), 0);
        assert_eq!(Hud::from_session(&s).lines[4], "Lap: 0");
        assert_eq!(s.health(), 100);
        assert!(!s.is_game_over());
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn frames_are_counted_separately_from_updates() {
        let mut s = session();
        s.pickups.clear();
        for _ in 0..200 {
            s.update(16.0, &FrameInput::default());
        }
        assert_eq!(s.frames_per_second(), 0);

        for _ in 0..21 {
            s.record_frame(50.0);
        }
        assert_eq!(s.frames_per_second(), 21);
    }

    #[test]
    fn camera_toggle_switches_to_cockpit() {
        let mut s = session();
        s.pickups.clear();
        s.update(10.0, &FrameInput::from_keys(false, false, true));
        assert_eq!(s.camera().mode(), CameraMode::FirstPerson);
        let eye = s.camera().view().eye;
        assert!(eye.distance(&(s.ship_position() + Vec3::new(0.0, 10.0, 0.0))) < 1e-4);
    }

    #[test]
    fn ship_matrix_carries_position() {
        let mut s = session();
        s.pickups.clear();
        s.update(16.0, &FrameInput::default());
        let m = s.ship_matrix();
        let p = s.ship_position();
        assert_eq!(m[3], [p.x, p.y, p.z, 1.0]);
        assert!(s.spin() > 0.0);
    }
}
