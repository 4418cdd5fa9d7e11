//! Agent physical state (§3, §4.2).

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::rng::GlobalRng;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// One population member's physical state. Every numeric field is clamped
/// on write so that the invariants in §3 hold unconditionally — callers
/// never need to re-validate an `Agent` after mutating it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    position: Position,
    direction: f64,
    velocity: f64,
    angular_vel: f64,
    size: f64,
    colour: Colour,
    /// Iteration index within the current generation; reset to 0 on
    /// reproduction.
    pub age: u64,

    min_size: f64,
    max_size: f64,
    max_velocity: f64,
    max_angular_velocity: f64,
}

impl Agent {
    /// Builds an agent with placeholder physical state and no RNG draws —
    /// for callers (e.g. reproduction) that are about to overwrite the
    /// physical state themselves and would otherwise waste a draw on a
    /// value that never survives to be read.
    pub fn bare(cfg: &Config) -> Self {
        Agent {
            position: Position { x: 0.0, y: 0.0 },
            direction: 0.0,
            velocity: 0.0,
            angular_vel: 0.0,
            size: cfg.min_size,
            colour: Colour { r: 0, g: 0, b: 0 },
            age: 0,
            min_size: cfg.min_size,
            max_size: cfg.max_size,
            max_velocity: cfg.max_velocity,
            max_angular_velocity: cfg.max_angular_velocity,
        }
    }

    /// Builds an agent with all physical fields re-randomised, as done at
    /// population init and at the start of every generation (§4.7 step 3).
    pub fn random(cfg: &Config, rng: &mut GlobalRng) -> Self {
        let mut a = Agent::bare(cfg);
        a.randomize_physical(cfg, rng);
        a
    }

    /// Re-randomises position, direction, velocity, angular velocity,
    /// size and colour, leaving `age` untouched (callers reset age
    /// themselves, since reproduction is the only caller and it always
    /// wants age zeroed anyway — see `NeuralAgent::reproduce_from`).
    pub fn randomize_physical(&mut self, cfg: &Config, rng: &mut GlobalRng) {
        self.set_position(Position {
            x: rng.range(0.0, cfg.screen_width),
            y: rng.range(0.0, cfg.screen_height),
        });
        self.set_direction(rng.range(0.0, TAU));
        self.set_velocity(rng.range(-cfg.max_velocity, cfg.max_velocity));
        self.set_angular_vel(rng.range(-cfg.max_angular_velocity, cfg.max_angular_velocity));
        self.set_size(rng.range(cfg.min_size, cfg.max_size));
        self.set_colour(Colour {
            r: rng.range(0.0, 256.0) as u8,
            g: rng.range(0.0, 256.0) as u8,
            b: rng.range(0.0, 256.0) as u8,
        });
    }

    /// Copies only physical attributes from `other` (not age) — the
    /// "copy constructor copies only physical attributes, not age" rule
    /// in §4.2.
    pub fn copy_physical_from(&mut self, other: &Agent) {
        self.position = other.position;
        self.direction = other.direction;
        self.velocity = other.velocity;
        self.angular_vel = other.angular_vel;
        self.size = other.size;
        self.colour = other.colour;
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, next: Position) {
        self.position = next;
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn set_direction(&mut self, next: f64) {
        self.direction = next.rem_euclid(TAU);
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn set_velocity(&mut self, next: f64) {
        self.velocity = next.clamp(-self.max_velocity, self.max_velocity);
    }

    pub fn angular_vel(&self) -> f64 {
        self.angular_vel
    }

    pub fn set_angular_vel(&mut self, next: f64) {
        self.angular_vel = next.clamp(-self.max_angular_velocity, self.max_angular_velocity);
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, next: f64) {
        self.size = next.clamp(self.min_size, self.max_size);
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn set_colour(&mut self, next: Colour) {
        self.colour = next;
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn max_angular_velocity(&self) -> f64 {
        self.max_angular_velocity
    }

    pub fn max_size(&self) -> f64 {
        self.max_size
    }

    /// Advances position by `delta` along the current direction:
    /// `(x,y) += delta * (sin(direction), cos(direction))` (§4.2).
    pub fn move_by(&mut self, delta: f64) {
        self.position.x += delta * self.direction.sin();
        self.position.y += delta * self.direction.cos();
    }

    pub fn in_bounds(&self, cfg: &Config) -> bool {
        self.position.x > 0.0
            && self.position.x < cfg.screen_width
            && self.position.y > 0.0
            && self.position.y < cfg.screen_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_with_bounds(max_velocity: f64, max_angular_velocity: f64) -> Agent {
        Agent {
            position: Position { x: 0.0, y: 0.0 },
            direction: 0.0,
            velocity: 0.0,
            angular_vel: 0.0,
            size: 5.0,
            colour: Colour { r: 0, g: 0, b: 0 },
            age: 0,
            min_size: 5.0,
            max_size: 20.0,
            max_velocity,
            max_angular_velocity,
        }
    }

    #[test]
    fn velocity_clamps_both_directions() {
        // Scenario A
        let mut a = agent_with_bounds(10.0, 1.0);
        a.set_velocity(50.0);
        assert_eq!(a.velocity(), 10.0);
        a.set_velocity(-50.0);
        assert_eq!(a.velocity(), -10.0);
    }

    #[test]
    fn size_clamps_to_bounds() {
        let mut a = agent_with_bounds(10.0, 1.0);
        a.set_size(1000.0);
        assert_eq!(a.size(), 20.0);
        a.set_size(-5.0);
        assert_eq!(a.size(), 5.0);
    }

    #[test]
    fn direction_reduces_modulo_tau() {
        let mut a = agent_with_bounds(10.0, 1.0);
        a.set_direction(TAU * 2.5);
        assert!(a.direction() >= 0.0 && a.direction() < TAU);
    }

    #[test]
    fn move_by_matches_spec_scenario_f() {
        // Scenario F: (100,100), direction=0, velocity=5, sigmoid(w)=0.4
        // -> new position (100, 102).
        let mut a = agent_with_bounds(10.0, 1.0);
        a.set_position(Position { x: 100.0, y: 100.0 });
        a.set_direction(0.0);
        a.set_velocity(5.0);
        let delta = 0.4 * a.velocity();
        a.move_by(delta);
        assert!((a.position().x - 100.0).abs() < 1e-9);
        assert!((a.position().y - 102.0).abs() < 1e-9);
    }

    #[test]
    fn copy_physical_from_does_not_copy_age() {
        let mut parent = agent_with_bounds(10.0, 1.0);
        parent.age = 42;
        parent.set_position(Position { x: 7.0, y: 9.0 });

        let mut child = agent_with_bounds(10.0, 1.0);
        child.age = 3;
        child.copy_physical_from(&parent);

        assert_eq!(child.position(), Position { x: 7.0, y: 9.0 });
        assert_eq!(child.age, 3);
    }
}
