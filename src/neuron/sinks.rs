//! Sink neurons: accumulate weighted writes, then drive one mutation of
//! the owning agent's state once per iteration (§4.3).

use crate::agent::Agent;

use super::sigmoid;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Move,
    Direction,
    Velocity,
    AngularVelocity,
    Red,
    Green,
    Blue,
    Size,
}

impl SinkKind {
    pub fn name(self) -> &'static str {
        match self {
            SinkKind::Move => "move",
            SinkKind::Direction => "direction",
            SinkKind::Velocity => "velocity",
            SinkKind::AngularVelocity => "angular-velocity",
            SinkKind::Red => "red",
            SinkKind::Green => "green",
            SinkKind::Blue => "blue",
            SinkKind::Size => "size",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "move" => SinkKind::Move,
            "direction" => SinkKind::Direction,
            "velocity" => SinkKind::Velocity,
            "angular-velocity" => SinkKind::AngularVelocity,
            "red" => SinkKind::Red,
            "green" => SinkKind::Green,
            "blue" => SinkKind::Blue,
            "size" => SinkKind::Size,
            _ => return None,
        })
    }

    pub const ALL: &'static [SinkKind] = &[
        SinkKind::Move,
        SinkKind::Direction,
        SinkKind::Velocity,
        SinkKind::AngularVelocity,
        SinkKind::Red,
        SinkKind::Green,
        SinkKind::Blue,
        SinkKind::Size,
    ];
}

/// A sink neuron instance: owns its accumulator and `applied` flag, so
/// (like sources and memory) it belongs to exactly one agent (§9).
#[derive(Copy, Clone, Debug)]
pub struct Sink {
    kind: SinkKind,
    accumulator: f64,
    applied: bool,
}

impl Sink {
    pub fn new(kind: SinkKind) -> Self {
        Sink {
            kind,
            accumulator: 0.0,
            applied: false,
        }
    }

    pub fn kind(&self) -> SinkKind {
        self.kind
    }

    pub fn write(&mut self, weight: f64) {
        self.accumulator += weight;
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.applied = false;
    }

    /// Flushes the accumulator through `sigmoid` and applies the kind's
    /// side effect to `agent`, exactly once per iteration (§4.3, Testable
    /// Property 4: calling this again before the next `reset` is a no-op).
    pub fn apply(&mut self, agent: &mut Agent) {
        if self.applied {
            return;
        }
        let w = sigmoid(self.accumulator);
        self.accumulator = w;
        match self.kind {
            SinkKind::Move => agent.move_by(w * agent.velocity()),
            SinkKind::Direction => agent.set_direction(agent.direction() + agent.angular_vel() * w),
            SinkKind::Velocity => agent.set_velocity(agent.velocity() + w),
            SinkKind::AngularVelocity => agent.set_angular_vel(agent.angular_vel() + w),
            SinkKind::Red => {
                let mut c = agent.colour();
                c.r = (255.0 * w).abs().min(255.0) as u8;
                agent.set_colour(c);
            }
            SinkKind::Green => {
                let mut c = agent.colour();
                c.g = (255.0 * w).abs().min(255.0) as u8;
                agent.set_colour(c);
            }
            SinkKind::Blue => {
                let mut c = agent.colour();
                c.b = (255.0 * w).abs().min(255.0) as u8;
                agent.set_colour(c);
            }
            SinkKind::Size => agent.set_size((agent.max_size() * w).abs()),
        }
        self.applied = true;
    }
}
