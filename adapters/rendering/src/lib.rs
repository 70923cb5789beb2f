#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for labyrinth adapters.

use anyhow::Result as AnyResult;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use labyrinth_core::{MazeGrid, Rgba, WorldPoint};
use std::{error::Error, f32::consts::FRAC_PI_2, fmt, time::Duration};

/// Height of the camera above the floor.
pub const EYE_HEIGHT: f32 = 3.0;

/// Half of the height of every wall block.
pub const WALL_HALF_HEIGHT: f32 = 10.0;

/// Uniform scale applied to object models.
pub const OBJECT_SCALE: f32 = 0.5;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Self::new(
            f32::from(color.red()) / 255.0,
            f32::from(color.green()) / 255.0,
            f32::from(color.blue()) / 255.0,
            f32::from(color.alpha()) / 255.0,
        )
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Whether the turn-left key is held.
    pub turn_left: bool,
    /// Whether the turn-right key is held.
    pub turn_right: bool,
    /// Whether the forward key is held.
    pub forward: bool,
    /// Whether the backward key is held.
    pub backward: bool,
    /// Vertical pointer offset from the viewport centre, as a fraction of its height.
    ///
    /// Positive values point below the centre.
    pub pointer_pitch: f32,
    /// Whether wireframe rendering was toggled on this frame.
    pub toggle_wireframe: bool,
    /// Whether floor-map mipmapping was toggled on this frame.
    pub toggle_mipmapping: bool,
    /// Whether anisotropic filtering was toggled on this frame.
    pub toggle_anisotropic: bool,
}

impl FrameInput {
    /// Derives the pointer pitch from a pointer row and the viewport height.
    #[must_use]
    pub fn pitch_from_pointer(pointer_y: f32, viewport_height: u32) -> f32 {
        if viewport_height == 0 {
            return 0.0;
        }
        let height = viewport_height as f32;
        (pointer_y - (viewport_height / 2) as f32) / height
    }
}

/// Rasterisation switches toggled by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DisplayOptions {
    /// Draw polygon outlines instead of filled faces.
    pub wireframe: bool,
    /// Sample the floor map with mipmaps instead of nearest texels.
    pub mipmapping: bool,
    /// Enable anisotropic filtering on the floor map.
    pub anisotropic: bool,
}

impl DisplayOptions {
    /// Flips every option whose toggle was pressed this frame.
    pub fn apply(&mut self, input: &FrameInput) {
        self.wireframe ^= input.toggle_wireframe;
        self.mipmapping ^= input.toggle_mipmapping;
        self.anisotropic ^= input.toggle_anisotropic;
    }
}

/// RGBA8 image ready to be uploaded as a texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureImage {
    /// Expands packed texels into an RGBA8 image.
    pub fn from_texels(width: u32, height: u32, texels: &[u32]) -> Result<Self, RenderingError> {
        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(RenderingError::TexelCountMismatch {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels: texels.iter().flat_map(|texel| texel.to_le_bytes()).collect(),
        })
    }

    /// Floor map image mirroring the grid, walls drawn opaque white.
    #[must_use]
    pub fn floor_map(grid: &MazeGrid) -> Self {
        Self {
            width: grid.columns(),
            height: grid.rows(),
            pixels: grid.to_rgba_bytes(),
        }
    }

    /// Progress strip laid out as a single column, one texel per entry.
    pub fn progress_strip(texels: &[u32]) -> Result<Self, RenderingError> {
        Self::from_texels(1, strip_height(texels.len())?, texels)
    }

    /// Width in texels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Two-texel compass needle: a red tip followed by a white tail.
#[must_use]
pub fn compass_texture() -> TextureImage {
    TextureImage {
        width: 1,
        height: 2,
        pixels: [Rgba::from_rgba(255, 0, 0, 255), Rgba::from_packed(u32::MAX)]
            .iter()
            .flat_map(|color| color.to_bytes())
            .collect(),
    }
}

/// Texture paired with the revision of the buffer it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionedTexture {
    /// Image contents.
    pub image: TextureImage,
    /// Revision of the source buffer.
    pub revision: u64,
}

impl VersionedTexture {
    /// Creates a new versioned texture.
    #[must_use]
    pub const fn new(image: TextureImage, revision: u64) -> Self {
        Self { image, revision }
    }
}

/// Remembers the last uploaded revision of a texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadTracker {
    uploaded: Option<u64>,
}

impl UploadTracker {
    /// Reports whether `revision` differs from the last uploaded one.
    #[must_use]
    pub fn needs_upload(&self, revision: u64) -> bool {
        self.uploaded != Some(revision)
    }

    /// Records `revision` as uploaded.
    pub fn mark_uploaded(&mut self, revision: u64) {
        self.uploaded = Some(revision);
    }

    /// Returns `true` once per new revision, recording it as uploaded.
    pub fn refresh(&mut self, revision: u64) -> bool {
        let stale = self.needs_upload(revision);
        if stale {
            self.mark_uploaded(revision);
        }
        stale
    }
}

/// First-person camera placed at eye height above the agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPresentation {
    /// Eye position.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up direction.
    pub up: Vec3,
}

impl CameraPresentation {
    /// Places the camera at the agent, looking one unit along the heading.
    ///
    /// `pitch` lowers the target by that many units; see [`FrameInput::pointer_pitch`].
    #[must_use]
    pub fn follow(position: WorldPoint, heading: f32, pitch: f32) -> Self {
        let (sin, cos) = heading.sin_cos();
        Self {
            eye: Vec3::new(position.x, EYE_HEIGHT, position.z),
            target: Vec3::new(position.x - sin, EYE_HEIGHT - pitch, position.z - cos),
            up: Vec3::Y,
        }
    }

    /// Right-handed view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Perspective volume used to project the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    /// Left clipping plane at the near distance.
    pub left: f32,
    /// Right clipping plane at the near distance.
    pub right: f32,
    /// Bottom clipping plane at the near distance.
    pub bottom: f32,
    /// Top clipping plane at the near distance.
    pub top: f32,
    /// Near clipping distance.
    pub near: f32,
    /// Far clipping distance.
    pub far: f32,
}

impl Frustum {
    /// Frustum one unit wide at the near plane, deep enough to see across the maze.
    pub fn for_viewport(width: u32, height: u32, plane_scale: f32) -> Result<Self, RenderingError> {
        if width == 0 || height == 0 {
            return Err(RenderingError::InvalidViewport { width, height });
        }
        let aspect = height as f32 / width as f32;
        Ok(Self {
            left: -0.5,
            right: 0.5,
            bottom: -0.5 * aspect,
            top: 0.5 * aspect,
            near: 1.0,
            far: 2.0 * plane_scale + 1.0,
        })
    }

    /// OpenGL-style projection matrix mapping depth into `[-1, 1]`.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        let width = self.right - self.left;
        let height = self.top - self.bottom;
        let depth = self.far - self.near;
        Mat4::from_cols(
            Vec4::new(2.0 * self.near / width, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * self.near / height, 0.0, 0.0),
            Vec4::new(
                (self.right + self.left) / width,
                (self.top + self.bottom) / height,
                -(self.far + self.near) / depth,
                -1.0,
            ),
            Vec4::new(0.0, 0.0, -2.0 * self.far * self.near / depth, 0.0),
        )
    }
}

/// Wall block drawn over a wall cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallInstance {
    /// Centre of the block.
    pub translation: Vec3,
    /// Half extents of the unit cube.
    pub scale: Vec3,
}

impl WallInstance {
    /// Creates a block standing on the cell centred at `center`.
    #[must_use]
    pub fn new(center: WorldPoint, half_width: f32, half_depth: f32) -> Self {
        Self {
            translation: Vec3::new(center.x, WALL_HALF_HEIGHT, center.z),
            scale: Vec3::new(half_width, WALL_HALF_HEIGHT, half_depth),
        }
    }

    /// Model matrix for a unit cube.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.translation)
    }
}

/// Mesh used to draw a collectible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectModel {
    /// Drawn for objects hosted by even cell indices.
    Ball,
    /// Drawn for objects hosted by odd cell indices.
    Fish,
}

/// Collectible drawn on the floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectInstance {
    /// Position of the model.
    pub translation: Vec3,
    /// Uniform model scale.
    pub scale: f32,
    /// Mesh to draw.
    pub model: ObjectModel,
}

impl ObjectInstance {
    /// Creates an instance for an object hosted by the cell at `cell_index`.
    #[must_use]
    pub fn new(position: WorldPoint, cell_index: usize) -> Self {
        let model = if cell_index % 2 == 0 {
            ObjectModel::Ball
        } else {
            ObjectModel::Fish
        };
        Self {
            translation: Vec3::new(position.x, OBJECT_SCALE, position.z),
            scale: OBJECT_SCALE,
            model,
        }
    }

    /// Model matrix for the object mesh.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::IDENTITY,
            self.translation,
        )
    }
}

/// Floor plane and the enclosing ceiling block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnclosurePresentation {
    /// Half of the extent covered by the maze.
    pub plane_scale: f32,
}

impl EnclosurePresentation {
    /// Model matrix laying a unit XY quad flat over the maze.
    #[must_use]
    pub fn floor_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(-FRAC_PI_2)
            * Mat4::from_scale(Vec3::new(self.plane_scale, self.plane_scale, 1.0))
    }

    /// Model matrix of the unit cube capping the maze.
    #[must_use]
    pub fn ceiling_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::new(self.plane_scale, WALL_HALF_HEIGHT, self.plane_scale),
            Quat::IDENTITY,
            Vec3::new(0.0, WALL_HALF_HEIGHT - 1.0, 0.0),
        )
    }
}

/// Screen-space placement of a head-up overlay quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayTransform {
    /// Offset in normalised device coordinates.
    pub translation: Vec2,
    /// Rotation around the view axis in radians.
    pub rotation: f32,
    /// Scale applied to the unit quad.
    pub scale: Vec3,
}

impl OverlayTransform {
    /// Model matrix of the overlay quad.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation.extend(0.0))
            * Mat4::from_rotation_z(self.rotation)
            * Mat4::from_scale(self.scale)
    }
}

/// Overlays drawn on top of the 3D view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudLayout {
    /// Needle rotating against the heading, top left.
    pub compass: OverlayTransform,
    /// Progress strip, top right.
    pub progress: OverlayTransform,
    /// Floor map rotating against the heading, bottom right.
    pub minimap: OverlayTransform,
}

impl HudLayout {
    /// Lays out the overlays for the provided agent heading.
    #[must_use]
    pub fn for_heading(heading: f32) -> Self {
        Self {
            compass: OverlayTransform {
                translation: Vec2::new(-0.75, 0.7),
                rotation: -heading,
                scale: Vec3::new(0.03 / 5.0, 1.0 / 5.0, 1.0 / 5.0),
            },
            progress: OverlayTransform {
                translation: Vec2::new(0.7, 0.9),
                rotation: -FRAC_PI_2,
                scale: Vec3::new(0.2 / 5.0, 1.0 / 5.0, 0.5),
            },
            minimap: OverlayTransform {
                translation: Vec2::new(0.75, -0.4),
                rotation: -heading,
                scale: Vec3::new(1.0 / 5.0, 1.0 / 5.0, 1.0),
            },
        }
    }
}

/// Textures sampled by the scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneTextures {
    /// Floor map, also drawn as the minimap.
    pub floor_map: VersionedTexture,
    /// Progress strip.
    pub progress: VersionedTexture,
    /// Compass needle.
    pub compass: TextureImage,
}

/// Declarative snapshot of everything drawn in a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Camera following the agent.
    pub camera: CameraPresentation,
    /// Floor and ceiling.
    pub enclosure: EnclosurePresentation,
    /// One block per wall cell.
    pub walls: Vec<WallInstance>,
    /// Collectibles still in the maze.
    pub objects: Vec<ObjectInstance>,
    /// Head-up overlays.
    pub hud: HudLayout,
    /// Textures sampled by the scene.
    pub textures: SceneTextures,
    /// Rasterisation switches.
    pub display: DisplayOptions,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        camera: CameraPresentation,
        enclosure: EnclosurePresentation,
        walls: Vec<WallInstance>,
        objects: Vec<ObjectInstance>,
        hud: HudLayout,
        textures: SceneTextures,
    ) -> Self {
        Self {
            camera,
            enclosure,
            walls,
            objects,
            hud,
            textures,
            display: DisplayOptions::default(),
        }
    }
}

/// Describes how a scene should be presented.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Projection volume.
    pub frustum: Frustum,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, frustum: Frustum, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            frustum,
            scene,
        }
    }
}

/// Rendering backend capable of presenting labyrinth scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene);
}

fn strip_height(entries: usize) -> Result<u32, RenderingError> {
    u32::try_from(entries).map_err(|_| RenderingError::StripTooLong { entries })
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The texel count does not match the image dimensions.
    TexelCountMismatch {
        /// Texels implied by the dimensions.
        expected: usize,
        /// Texels provided.
        actual: usize,
    },
    /// The strip has more entries than a texture dimension can address.
    StripTooLong {
        /// Entries provided.
        entries: usize,
    },
    /// The viewport has a zero dimension.
    InvalidViewport {
        /// Viewport width in pixels.
        width: u32,
        /// Viewport height in pixels.
        height: u32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TexelCountMismatch { expected, actual } => {
                write!(f, "expected {expected} texels (received {actual})")
            }
            Self::StripTooLong { entries } => {
                write!(f, "strip of {entries} entries exceeds the texture height limit")
            }
            Self::InvalidViewport { width, height } => {
                write!(f, "viewport must not be empty (received {width}x{height})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_core::CellCoord;

    fn assert_vec3_close(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, 1e-5),
            "expected {expected:?}, received {actual:?}"
        );
    }

    #[test]
    fn texture_rejects_mismatched_texel_count() {
        let error = TextureImage::from_texels(2, 2, &[0, 0, 0])
            .expect_err("three texels cannot fill a 2x2 image");

        assert_eq!(
            error,
            RenderingError::TexelCountMismatch {
                expected: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn texture_expands_texels_to_rgba_bytes() {
        let image = TextureImage::from_texels(2, 1, &[Rgba::from_rgb(1, 2, 3).packed(), 0])
            .expect("dimensions match");

        assert_eq!(image.pixels(), &[1, 2, 3, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn floor_map_draws_walls_white() {
        let mut grid = MazeGrid::parse("#.\n..").expect("layout parses");
        let _ = grid
            .paint(CellCoord::new(1, 0), Rgba::from_rgb(255, 0, 0))
            .expect("cell in bounds");
        let image = TextureImage::floor_map(&grid);

        assert_eq!((image.width(), image.height()), (2, 2));
        assert_eq!(&image.pixels()[..8], &[255, 255, 255, 255, 255, 0, 0, 255]);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_strip_is_rejected() {
        let entries = u32::MAX as usize + 1;

        assert_eq!(strip_height(entries), Err(RenderingError::StripTooLong { entries }));
        assert_eq!(strip_height(12), Ok(12));
    }

    #[test]
    fn progress_strip_is_a_single_column() {
        let image = TextureImage::progress_strip(&[1, 2, 3]).expect("strip builds");
        assert_eq!((image.width(), image.height()), (1, 3));
    }

    #[test]
    fn compass_is_red_over_white() {
        let compass = compass_texture();

        assert_eq!((compass.width(), compass.height()), (1, 2));
        assert_eq!(compass.pixels(), &[255, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn upload_tracker_reports_each_revision_once() {
        let mut tracker = UploadTracker::default();

        assert!(tracker.needs_upload(0));
        assert!(tracker.refresh(0));
        assert!(!tracker.refresh(0));
        assert!(tracker.refresh(1));
        assert!(!tracker.needs_upload(1));
    }

    #[test]
    fn camera_looks_along_the_heading() {
        let camera = CameraPresentation::follow(WorldPoint::new(4.0, -2.0), FRAC_PI_2, 0.25);

        assert_vec3_close(camera.eye, Vec3::new(4.0, 3.0, -2.0));
        assert_vec3_close(camera.target, Vec3::new(3.0, 2.75, -2.0));
        assert_eq!(camera.up, Vec3::Y);
    }

    #[test]
    fn pointer_pitch_is_relative_to_the_viewport_centre() {
        assert_eq!(FrameInput::pitch_from_pointer(300.0, 600), 0.0);
        assert_eq!(FrameInput::pitch_from_pointer(450.0, 600), 0.25);
        assert_eq!(FrameInput::pitch_from_pointer(10.0, 0), 0.0);
    }

    #[test]
    fn frustum_spans_the_maze() {
        let frustum = Frustum::for_viewport(800, 400, 100.0).expect("viewport valid");

        assert_eq!(frustum.near, 1.0);
        assert_eq!(frustum.far, 201.0);
        assert_eq!(frustum.top, 0.25);
        assert_eq!(frustum.bottom, -0.25);

        let near_centre = frustum.projection_matrix() * Vec4::new(0.0, 0.0, -1.0, 1.0);
        assert!((near_centre.z / near_centre.w + 1.0).abs() < 1e-5);
        assert_eq!(
            Frustum::for_viewport(0, 400, 100.0),
            Err(RenderingError::InvalidViewport {
                width: 0,
                height: 400,
            })
        );
    }

    #[test]
    fn wall_blocks_stand_on_their_cells() {
        let wall = WallInstance::new(WorldPoint::new(5.0, -7.0), 2.0, 3.0);

        assert_vec3_close(wall.translation, Vec3::new(5.0, 10.0, -7.0));
        assert_vec3_close(wall.scale, Vec3::new(2.0, 10.0, 3.0));
        assert_vec3_close(
            wall.model_matrix().transform_point3(Vec3::new(-1.0, -1.0, 1.0)),
            Vec3::new(3.0, 0.0, -4.0),
        );
    }

    #[test]
    fn object_models_alternate_by_cell_parity() {
        let even = ObjectInstance::new(WorldPoint::new(1.0, 2.0), 4);
        let odd = ObjectInstance::new(WorldPoint::new(1.0, 2.0), 7);

        assert_eq!(even.model, ObjectModel::Ball);
        assert_eq!(odd.model, ObjectModel::Fish);
        assert_vec3_close(even.translation, Vec3::new(1.0, 0.5, 2.0));
        assert_eq!(even.scale, 0.5);
    }

    #[test]
    fn display_options_flip_on_toggle() {
        let mut display = DisplayOptions::default();
        let input = FrameInput {
            toggle_wireframe: true,
            toggle_anisotropic: true,
            ..FrameInput::default()
        };

        display.apply(&input);
        assert!(display.wireframe && display.anisotropic && !display.mipmapping);

        display.apply(&input);
        assert_eq!(display, DisplayOptions::default());
    }

    #[test]
    fn floor_covers_the_maze() {
        let enclosure = EnclosurePresentation { plane_scale: 30.0 };
        let corner = enclosure
            .floor_matrix()
            .transform_point3(Vec3::new(1.0, 1.0, 0.0));

        assert_vec3_close(corner, Vec3::new(30.0, 0.0, -30.0));
    }

    #[test]
    fn color_converts_from_packed_rgba() {
        let color = Color::from(Rgba::from_rgb(255, 0, 0));
        assert_eq!(color, Color::from_rgb_u8(255, 0, 0));
    }
}
