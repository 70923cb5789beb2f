#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that turns held directions into walk and turn commands.

use std::{f32::consts::PI, time::Duration};

use labyrinth_core::{AgentSnapshot, Command, Displacement, Event};

/// Configuration parameters required to construct the movement system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    walk_speed: f32,
    turn_rate: f32,
    probe_reach: f32,
}

impl Config {
    /// Creates a configuration from walking speed, turning rate and probe reach.
    ///
    /// `walk_speed` is in world units per second, `turn_rate` in radians per
    /// second. `probe_reach` extends the collision probe beyond the step so
    /// the agent keeps its distance from walls.
    #[must_use]
    pub const fn new(walk_speed: f32, turn_rate: f32, probe_reach: f32) -> Self {
        Self {
            walk_speed,
            turn_rate,
            probe_reach,
        }
    }

    /// World units travelled per second.
    #[must_use]
    pub const fn walk_speed(&self) -> f32 {
        self.walk_speed
    }

    /// Radians turned per second.
    #[must_use]
    pub const fn turn_rate(&self) -> f32 {
        self.turn_rate
    }

    /// Extra look-ahead added to every probe.
    #[must_use]
    pub const fn probe_reach(&self) -> f32 {
        self.probe_reach
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(10.0, PI, 5.0)
    }
}

/// Directions held by the player during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionInput {
    /// Rotate counter-clockwise.
    pub turn_left: bool,
    /// Rotate clockwise.
    pub turn_right: bool,
    /// Walk along the heading.
    pub forward: bool,
    /// Walk against the heading.
    pub backward: bool,
}

impl MotionInput {
    /// Reports whether no direction is held.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        !(self.turn_left || self.turn_right || self.forward || self.backward)
    }
}

/// Pure system that reacts to elapsed time and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement {
    config: Config,
}

impl Movement {
    /// Creates a movement system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Consumes world events and the held input to emit movement commands.
    ///
    /// Time is taken from `TimeAdvanced` events; without elapsed time nothing
    /// is emitted. The walk uses the heading from `agent`, so a turn requested
    /// in the same frame applies to the next one.
    pub fn handle(
        &self,
        events: &[Event],
        input: MotionInput,
        agent: AgentSnapshot,
        out: &mut Vec<Command>,
    ) {
        let elapsed = elapsed(events);
        if elapsed.is_zero() || input.is_idle() {
            return;
        }
        let dt = elapsed.as_secs_f32();

        let direction = axis(input.forward, input.backward);
        if direction != 0.0 {
            let (sin, cos) = agent.heading.sin_cos();
            let distance = direction * dt * self.config.walk_speed;
            let reach = distance + direction * self.config.probe_reach;
            out.push(Command::Walk {
                step: Displacement::new(-sin * distance, -cos * distance),
                probe: Displacement::new(-sin * reach, -cos * reach),
            });
        }

        let rotation = axis(input.turn_left, input.turn_right);
        if rotation != 0.0 {
            out.push(Command::Turn {
                radians: rotation * dt * self.config.turn_rate,
            });
        }
    }
}

fn elapsed(events: &[Event]) -> Duration {
    events
        .iter()
        .filter_map(|event| match event {
            Event::TimeAdvanced { dt } => Some(*dt),
            _ => None,
        })
        .sum()
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_cancels_opposing_keys() {
        assert_eq!(axis(true, true), 0.0);
        assert_eq!(axis(false, false), 0.0);
        assert_eq!(axis(true, false), 1.0);
        assert_eq!(axis(false, true), -1.0);
    }

    #[test]
    fn elapsed_sums_every_tick() {
        let events = [
            Event::TimeAdvanced {
                dt: Duration::from_millis(10),
            },
            Event::AgentTurned { heading: 0.0 },
            Event::TimeAdvanced {
                dt: Duration::from_millis(15),
            },
        ];
        assert_eq!(elapsed(&events), Duration::from_millis(25));
    }
}
