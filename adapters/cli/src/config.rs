//! Run configuration loaded from TOML and overridden by command-line flags.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use labyrinth_core::MazeConfig;
use serde::Deserialize;

use crate::Cli;

/// Settings for a single headless run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct RunConfig {
    /// Seed for maze generation and the scripted input; random when absent.
    pub(crate) seed: Option<u64>,
    /// Number of frames to simulate.
    pub(crate) frames: u32,
    /// Simulated duration of each frame in milliseconds.
    pub(crate) frame_ms: u64,
    /// Maze parameters.
    pub(crate) maze: MazeConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frames: 600,
            frame_ms: 16,
            maze: MazeConfig::default(),
        }
    }
}

impl RunConfig {
    /// Reads the configuration from `path`, or returns the defaults.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load config file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }

    /// Replaces every field for which a flag was given.
    pub(crate) fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(frames) = cli.frames {
            self.frames = frames;
        }
        if let Some(frame_ms) = cli.frame_ms {
            self.frame_ms = frame_ms;
        }
        if let Some(side) = cli.side {
            self.maze.side = side;
        }
        if let Some(plane_scale) = cli.plane_scale {
            self.maze.plane_scale = plane_scale;
        }
        if let Some(objects) = cli.objects {
            self.maze.object_count = Some(objects);
        }
        if let Some(braid) = cli.braid {
            self.maze.braid = braid;
        }
    }

    pub(crate) fn frame_time(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = RunConfig::parse(
            r#"
            frames = 30

            [maze]
            side = 9
            "#,
        )
        .expect("config parses");

        assert_eq!(config.frames, 30);
        assert_eq!(config.frame_ms, 16);
        assert_eq!(config.seed, None);
        assert_eq!(config.maze.side, 9);
        assert_eq!(config.maze.plane_scale, MazeConfig::DEFAULT_PLANE_SCALE);
        assert_eq!(config.maze.objects(), 9);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(RunConfig::parse("frames = \"many\"").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = RunConfig::parse("seed = 1\n[maze]\nside = 9\nbraid = 0.5")
            .expect("config parses");
        let cli = Cli::parse_from([
            "labyrinth",
            "--seed",
            "42",
            "--side",
            "21",
            "--objects",
            "3",
            "--frame-ms",
            "20",
        ]);

        config.apply_overrides(&cli);

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.maze.side, 21);
        assert_eq!(config.maze.object_count, Some(3));
        assert_eq!(config.maze.braid, 0.5);
        assert_eq!(config.frame_time(), Duration::from_millis(20));
    }

    #[test]
    fn load_without_path_uses_defaults() {
        assert_eq!(RunConfig::load(None).expect("defaults"), RunConfig::default());
    }
}
