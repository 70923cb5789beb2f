//! Window-less rendering backend driven by scripted input.

use std::time::Duration;

use anyhow::Result as AnyResult;
use labyrinth_rendering::{
    FrameInput, Frustum, Presentation, RenderingBackend, Scene, UploadTracker,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded generator of held directions that mimics a wandering player.
#[derive(Debug)]
pub(crate) struct InputScript {
    rng: ChaCha8Rng,
    viewport_height: u32,
    current: FrameInput,
    remaining: u32,
}

impl InputScript {
    pub(crate) fn new(seed: u64, viewport_height: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            viewport_height,
            current: FrameInput::default(),
            remaining: 0,
        }
    }

    /// Input for the next frame; a new gesture starts whenever the last one ran out.
    pub(crate) fn next_input(&mut self) -> FrameInput {
        if self.remaining == 0 {
            let turn = self.rng.gen_range(0..4);
            let pointer_y = self.rng.gen_range(0.3..0.7) * self.viewport_height as f32;
            self.current = FrameInput {
                turn_left: turn == 0,
                turn_right: turn == 1,
                forward: self.rng.gen_bool(0.8),
                backward: false,
                pointer_pitch: FrameInput::pitch_from_pointer(pointer_y, self.viewport_height),
                ..FrameInput::default()
            };
            self.current.backward = !self.current.forward && self.rng.gen_bool(0.5);
            self.remaining = self.rng.gen_range(10..60);
        }
        self.remaining -= 1;
        self.current
    }
}

/// Backend that steps the scene for a fixed number of frames without a window.
#[derive(Debug)]
pub(crate) struct HeadlessBackend {
    frames: u32,
    frame_time: Duration,
    script: InputScript,
}

impl HeadlessBackend {
    pub(crate) fn new(frames: u32, frame_time: Duration, script: InputScript) -> Self {
        Self {
            frames,
            frame_time,
            script,
        }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene),
    {
        let Presentation {
            window_title,
            frustum,
            mut scene,
            ..
        } = presentation;
        log::info!("presenting `{window_title}` headless for {} frames", self.frames);

        let mut floor_uploads = UploadTracker::default();
        let mut progress_uploads = UploadTracker::default();
        let mut uploads = 0_u32;
        for _ in 0..self.frames {
            let input = self.script.next_input();
            update_scene(self.frame_time, input, &mut scene);

            if floor_uploads.refresh(scene.textures.floor_map.revision) {
                uploads += 1;
            }
            if progress_uploads.refresh(scene.textures.progress.revision) {
                uploads += 1;
            }
        }

        log::debug!(
            "{uploads} texture uploads, {} of {} walls in view on the last frame",
            visible_walls(&scene, &frustum),
            scene.walls.len()
        );
        Ok(())
    }
}

/// Counts wall blocks whose centre projects inside the clip volume.
fn visible_walls(scene: &Scene, frustum: &Frustum) -> usize {
    let view_projection = frustum.projection_matrix() * scene.camera.view_matrix();
    scene
        .walls
        .iter()
        .filter(|wall| {
            let clip = view_projection * wall.translation.extend(1.0);
            clip.w > 0.0
                && clip.x.abs() <= clip.w
                && clip.y.abs() <= clip.w
                && clip.z.abs() <= clip.w
        })
        .count()
}
