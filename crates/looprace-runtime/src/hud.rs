//! HUD text for a race session

use crate::session::RaceSession;
use std::fmt;

/// Text overlay lines, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub lines: Vec<String>,
}

impl Hud {
    pub fn from_session(session: &RaceSession) -> Self {
        let mut lines = vec![
            "Use C to change camera views".to_string(),
            format!("Pick up: {}", session.target()),
            format!("Health: {}", session.health()),
            format!("Points: {}", session.points()),
            format!("Lap: {}", session.lap()),
        ];

        let fps = session.frames_per_second();
        if fps > 0 {
            lines.push(format!("FPS: {}", fps));
        }

        if session.is_game_over() {
            lines.push("GAME OVER!".to_string());
            lines.push(format!("TOTAL POINTS: {}", session.points()));
            lines.push(format!("LAPS COMPLETED: {}", session.laps_completed()));
        }

        Self { lines }
    }
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::input::FrameInput;
    use looprace_track::{Track, TrackConfig};

    fn session() -> RaceSession {
        let track = Track::build(&TrackConfig::default()).unwrap();
        let config = SessionConfig {
            seed: Some(3),
            ..SessionConfig::default()
        };
        RaceSession::new(track, config).unwrap()
    }

    #[test]
    fn fresh_race_lines() {
        let s = session();
        let hud = Hud::from_session(&s);
        assert_eq!(hud.lines.len(), 5);
        assert_eq!(hud.lines[0], "Use C to change camera views");
        assert_eq!(hud.lines[1], format!("Pick up: {}", s.target().name()));
        assert_eq!(hud.lines[2], "Health: 100");
        assert_eq!(hud.lines[3], "Points: 0");
        assert_eq!(hud.lines[4], "Lap: 0");
    }

    #[test]
    fn frame_rate_appears_after_a_second() {
        let mut s = session();
        for _ in 0..70 {
            s.update(16.0, &FrameInput::default());
            s.record_frame(16.0);
        }
        let hud = Hud::from_session(&s);
        assert!(hud.lines.iter().any(|l| l.starts_with("FPS: ")));
        assert!(hud.to_string().ends_with('\n'));
    }
}
