use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use labyrinth_core::{CellCoord, Command, Event, MazeConfig, ObjectId};
use labyrinth_system_movement::{MotionInput, Movement};
use labyrinth_world::{self as world, query, World};

#[test]
fn deterministic_replay_produces_identical_outcomes() {
    let first = replay(scripted_inputs());
    let second = replay(scripted_inputs());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(
        first
            .events
            .iter()
            .any(|event| matches!(event, EventRecord::AgentMoved { .. })),
        "scripted input never moved the agent"
    );
}

#[test]
fn different_seeds_build_different_mazes() {
    let config = MazeConfig::default();
    let first = World::new(&config, 1).expect("world builds");
    let second = World::new(&config, 2).expect("world builds");

    assert_ne!(query::maze_grid(&first), query::maze_grid(&second));
}

fn replay(inputs: Vec<(Duration, MotionInput)>) -> ReplayOutcome {
    let config = MazeConfig {
        side: 11,
        plane_scale: 55.0,
        object_count: Some(11),
        braid: 0.3,
    };
    let mut world = World::new(&config, 0x5eed).expect("world builds");
    let movement = Movement::default();
    let mut log = Vec::new();

    for (dt, input) in inputs {
        let mut events = Vec::new();
        world::apply(&mut world, Command::Tick { dt }, &mut events);
        record_events(&events, &mut log);

        let mut commands = Vec::new();
        movement.handle(&events, input, query::agent(&world), &mut commands);
        for command in commands {
            let mut generated = Vec::new();
            world::apply(&mut world, command, &mut generated);
            record_events(&generated, &mut log);
        }
    }

    let agent = query::agent(&world);
    ReplayOutcome {
        agent_bits: (agent.position.x.to_bits(), agent.position.z.to_bits()),
        heading_bits: agent.heading.to_bits(),
        floor: query::maze_grid(&world).texels().to_vec(),
        progress: query::progress_buffer(&world).to_vec(),
        events: log,
    }
}

fn record_events(events: &[Event], log: &mut Vec<EventRecord>) {
    log.extend(events.iter().map(EventRecord::from));
}

fn scripted_inputs() -> Vec<(Duration, MotionInput)> {
    let forward = MotionInput {
        forward: true,
        ..MotionInput::default()
    };
    let turning = MotionInput {
        forward: true,
        turn_left: true,
        ..MotionInput::default()
    };
    let retreat = MotionInput {
        backward: true,
        turn_right: true,
        ..MotionInput::default()
    };

    let mut inputs = Vec::new();
    for round in 0..12_u64 {
        let dt = Duration::from_millis(16 + round);
        inputs.extend(std::iter::repeat((dt, forward)).take(40));
        inputs.extend(std::iter::repeat((dt, turning)).take(25));
        inputs.extend(std::iter::repeat((dt, retreat)).take(10));
    }
    inputs
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    agent_bits: (u32, u32),
    heading_bits: u32,
    floor: Vec<u32>,
    progress: Vec<u32>,
    events: Vec<EventRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    TimeAdvanced { dt_micros: u128 },
    AgentTurned { heading_bits: u32 },
    AgentMoved { to_bits: (u32, u32) },
    MotionBlocked { along_x: bool, along_z: bool },
    CellEntered { to: CellCoord },
    ObjectCollected { object: ObjectId, collected: u32 },
    AllObjectsCollected { total: u32 },
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        match event {
            Event::TimeAdvanced { dt } => Self::TimeAdvanced {
                dt_micros: dt.as_micros(),
            },
            Event::AgentTurned { heading } => Self::AgentTurned {
                heading_bits: heading.to_bits(),
            },
            Event::AgentMoved { to, .. } => Self::AgentMoved {
                to_bits: (to.x.to_bits(), to.z.to_bits()),
            },
            Event::MotionBlocked { along_x, along_z } => Self::MotionBlocked {
                along_x: *along_x,
                along_z: *along_z,
            },
            Event::CellEntered { to, .. } => Self::CellEntered { to: *to },
            Event::ObjectCollected {
                object, collected, ..
            } => Self::ObjectCollected {
                object: *object,
                collected: *collected,
            },
            Event::AllObjectsCollected { total } => Self::AllObjectsCollected { total: *total },
        }
    }
}
