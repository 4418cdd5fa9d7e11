//! Source neurons: pure functions of agent state (and/or configuration)
//! (§4.3).

use crate::agent::Agent;
use crate::config::Config;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Age,
    West,
    East,
    North,
    South,
    Direction,
    Velocity,
    AngularVelocity,
    GoalReached,
    OutOfBounds,
    Red,
    Green,
    Blue,
    Size,
}

impl SourceKind {
    pub fn name(self) -> &'static str {
        match self {
            SourceKind::Age => "age",
            SourceKind::West => "west",
            SourceKind::East => "east",
            SourceKind::North => "north",
            SourceKind::South => "south",
            SourceKind::Direction => "direction",
            SourceKind::Velocity => "velocity",
            SourceKind::AngularVelocity => "angular-velocity",
            SourceKind::GoalReached => "goal-reached",
            SourceKind::OutOfBounds => "out-of-bounds",
            SourceKind::Red => "red",
            SourceKind::Green => "green",
            SourceKind::Blue => "blue",
            SourceKind::Size => "size",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "age" => SourceKind::Age,
            "west" => SourceKind::West,
            "east" => SourceKind::East,
            "north" => SourceKind::North,
            "south" => SourceKind::South,
            "direction" => SourceKind::Direction,
            "velocity" => SourceKind::Velocity,
            "angular-velocity" => SourceKind::AngularVelocity,
            "goal-reached" => SourceKind::GoalReached,
            "out-of-bounds" => SourceKind::OutOfBounds,
            "red" => SourceKind::Red,
            "green" => SourceKind::Green,
            "blue" => SourceKind::Blue,
            "size" => SourceKind::Size,
            _ => return None,
        })
    }

    pub const ALL: &'static [SourceKind] = &[
        SourceKind::Age,
        SourceKind::West,
        SourceKind::East,
        SourceKind::North,
        SourceKind::South,
        SourceKind::Direction,
        SourceKind::Velocity,
        SourceKind::AngularVelocity,
        SourceKind::GoalReached,
        SourceKind::OutOfBounds,
        SourceKind::Red,
        SourceKind::Green,
        SourceKind::Blue,
        SourceKind::Size,
    ];
}

/// A source neuron instance. Sources carry no state of their own (`read`
/// is a pure function); `write`/`reset`/`apply` are genuinely absent
/// rather than no-ops, since nothing in the brain ever calls them on a
/// `Source` end (the type system enforces this — see `brain::ReadEnd`).
#[derive(Copy, Clone, Debug)]
pub struct Source {
    kind: SourceKind,
}

impl Source {
    pub fn new(kind: SourceKind) -> Self {
        Source { kind }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// `goal_reached` is the survival predicate evaluated for this agent
    /// this iteration, threaded in rather than recomputed here so the
    /// predicate (which may be expensive or user-composed) runs at most
    /// once per agent per iteration regardless of how many connections
    /// reference `goal-reached`.
    pub fn read(&self, agent: &Agent, cfg: &Config, goal_reached: bool) -> f64 {
        match self.kind {
            SourceKind::Age => agent.age as f64 / cfg.gen_iters as f64,
            SourceKind::West => (cfg.screen_width - agent.position().x) / cfg.screen_width,
            SourceKind::East => 1.0 - (cfg.screen_width - agent.position().x) / cfg.screen_width,
            SourceKind::North => (cfg.screen_height - agent.position().y) / cfg.screen_height,
            SourceKind::South => 1.0 - (cfg.screen_height - agent.position().y) / cfg.screen_height,
            SourceKind::Direction => agent.direction() / std::f64::consts::TAU,
            SourceKind::Velocity => agent.velocity() / agent.max_velocity(),
            SourceKind::AngularVelocity => agent.angular_vel() / agent.max_angular_velocity(),
            SourceKind::GoalReached => {
                if goal_reached {
                    1.0
                } else {
                    0.0
                }
            }
            SourceKind::OutOfBounds => {
                if agent.in_bounds(cfg) {
                    1.0
                } else {
                    0.0
                }
            }
            SourceKind::Red => agent.colour().r as f64 / 255.0,
            SourceKind::Green => agent.colour().g as f64 / 255.0,
            SourceKind::Blue => agent.colour().b as f64 / 255.0,
            SourceKind::Size => agent.size() / agent.max_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_round_trips_through_its_name() {
        for &kind in SourceKind::ALL {
            assert_eq!(SourceKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        assert_eq!(SourceKind::from_name("not-a-real-source"), None);
    }
}
