#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates a labyrinth and walks it headless.

mod config;
mod headless;
mod map;
mod scene;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use labyrinth_core::{Command, Event};
use labyrinth_rendering::{Color, FrameInput, Frustum, Presentation, RenderingBackend};
use labyrinth_system_movement::{MotionInput, Movement};
use labyrinth_world::{self as world, query, World};

use crate::{
    config::RunConfig,
    headless::{HeadlessBackend, InputScript},
};

const VIEWPORT_WIDTH: u32 = 800;
const VIEWPORT_HEIGHT: u32 = 600;

/// Walk a generated 3D labyrinth and collect every object.
#[derive(Debug, Parser)]
#[command(name = "labyrinth", version)]
pub(crate) struct Cli {
    /// TOML file providing the run configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for maze generation and scripted input.
    #[arg(long)]
    seed: Option<u64>,
    /// Number of cells along each side of the maze.
    #[arg(long)]
    side: Option<u32>,
    /// Half of the world-space extent covered by the maze.
    #[arg(long)]
    plane_scale: Option<f32>,
    /// Number of collectible objects.
    #[arg(long)]
    objects: Option<u32>,
    /// Probability of opening an extra passage at each dead end.
    #[arg(long)]
    braid: Option<f32>,
    /// Number of frames to simulate.
    #[arg(long)]
    frames: Option<u32>,
    /// Simulated duration of each frame in milliseconds.
    #[arg(long)]
    frame_ms: Option<u64>,
    /// Print the maze as text before walking it.
    #[arg(long)]
    print_map: bool,
}

/// Entry point for the labyrinth command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = RunConfig::load(cli.config.as_deref())?;
    config.apply_overrides(&cli);
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("using seed {seed}");

    let mut world = World::new(&config.maze, seed).context("failed to build the labyrinth")?;
    println!("{}", query::welcome_banner(&world));
    if cli.print_map {
        print!("{}", map::ascii_map(&world));
    }

    let frustum = Frustum::for_viewport(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, config.maze.plane_scale)?;
    let presentation = Presentation::new(
        "Labyrinth",
        Color::from_rgb_u8(0, 0, 0),
        frustum,
        scene::build_scene(&world, 0.0)?,
    );
    let backend = HeadlessBackend::new(
        config.frames,
        config.frame_time(),
        InputScript::new(seed, VIEWPORT_HEIGHT),
    );

    let movement = Movement::default();
    backend.run(presentation, |dt, input, scene| {
        advance(&mut world, &movement, dt, input);
        scene.display.apply(&input);
        if let Err(error) = scene::refresh_scene(&world, scene, input.pointer_pitch) {
            log::warn!("scene refresh failed: {error}");
        }
    })?;

    let agent = query::agent(&world);
    println!(
        "collected {}/{} objects over {} ticks; agent at ({:.2}, {:.2})",
        query::collected(&world),
        query::total_objects(&world),
        query::tick_index(&world),
        agent.position.x,
        agent.position.z
    );
    Ok(())
}

/// Ticks the world, then applies the commands the movement system derives from the input.
fn advance(world: &mut World, movement: &Movement, dt: Duration, input: FrameInput) {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt }, &mut events);

    let mut commands = Vec::new();
    movement.handle(&events, motion_input(&input), query::agent(world), &mut commands);

    for command in commands {
        events.clear();
        world::apply(world, command, &mut events);
        for event in &events {
            report(event);
        }
    }
}

fn motion_input(input: &FrameInput) -> MotionInput {
    MotionInput {
        turn_left: input.turn_left,
        turn_right: input.turn_right,
        forward: input.forward,
        backward: input.backward,
    }
}

fn report(event: &Event) {
    match event {
        Event::ObjectCollected {
            object, collected, ..
        } => log::info!("collected object {} ({collected} so far)", object.get()),
        Event::AllObjectsCollected { total } => log::info!("all {total} objects collected"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_core::{MazeConfig, MazeGrid};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn frame_input_maps_onto_motion_input() {
        let input = FrameInput {
            forward: true,
            turn_right: true,
            pointer_pitch: 0.3,
            ..FrameInput::default()
        };

        assert_eq!(
            motion_input(&input),
            MotionInput {
                forward: true,
                turn_right: true,
                ..MotionInput::default()
            }
        );
    }

    #[test]
    fn advancing_ticks_and_moves_the_agent() {
        let grid = MazeGrid::parse("...\n...\n...").expect("layout parses");
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut world = World::from_grid(grid, 30.0, 0, &mut rng).expect("world builds");
        let start = query::agent(&world).position;
        let input = FrameInput {
            forward: true,
            ..FrameInput::default()
        };

        advance(&mut world, &Movement::default(), Duration::from_millis(100), input);

        assert_eq!(query::tick_index(&world), 1);
        assert!((query::agent(&world).position.z - (start.z - 1.0)).abs() < 1e-4);
    }

    #[test]
    fn seeded_worlds_match() {
        let config = MazeConfig {
            side: 11,
            ..MazeConfig::default()
        };
        let first = World::new(&config, 99).expect("world builds");
        let second = World::new(&config, 99).expect("world builds");

        assert_eq!(map::ascii_map(&first), map::ascii_map(&second));
    }
}
