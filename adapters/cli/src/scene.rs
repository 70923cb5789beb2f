//! Translates world queries into rendering scenes.

use labyrinth_core::CellKind;
use labyrinth_rendering::{
    compass_texture, CameraPresentation, EnclosurePresentation, HudLayout, ObjectInstance,
    RenderingError, Scene, SceneTextures, TextureImage, VersionedTexture, WallInstance,
};
use labyrinth_world::{query, World};

/// Builds the scene describing the current world state.
pub(crate) fn build_scene(world: &World, pitch: f32) -> Result<Scene, RenderingError> {
    let agent = query::agent(world);
    let walls = query::walls(world)
        .cells()
        .iter()
        .filter(|cell| cell.kind() == CellKind::Wall)
        .map(|cell| WallInstance::new(cell.center(), cell.half_width(), cell.half_depth()))
        .collect();

    Ok(Scene::new(
        CameraPresentation::follow(agent.position, agent.heading, pitch),
        EnclosurePresentation {
            plane_scale: query::plane_scale(world),
        },
        walls,
        object_instances(world),
        HudLayout::for_heading(agent.heading),
        SceneTextures {
            floor_map: floor_texture(world),
            progress: progress_texture(world)?,
            compass: compass_texture(),
        },
    ))
}

/// Updates the parts of `scene` that change while walking.
///
/// Textures are rebuilt only when the world reports a new revision.
pub(crate) fn refresh_scene(
    world: &World,
    scene: &mut Scene,
    pitch: f32,
) -> Result<(), RenderingError> {
    let agent = query::agent(world);
    scene.camera = CameraPresentation::follow(agent.position, agent.heading, pitch);
    scene.hud = HudLayout::for_heading(agent.heading);

    let revisions = query::revisions(world);
    if scene.textures.floor_map.revision != revisions.floor {
        scene.textures.floor_map = floor_texture(world);
    }
    if scene.textures.progress.revision != revisions.progress {
        scene.textures.progress = progress_texture(world)?;
        scene.objects = object_instances(world);
    }
    Ok(())
}

fn object_instances(world: &World) -> Vec<ObjectInstance> {
    let walls = query::walls(world);
    query::remaining_objects(world)
        .filter_map(|object| {
            let index = walls.index(object.cell())?;
            Some(ObjectInstance::new(object.position(), index))
        })
        .collect()
}

fn floor_texture(world: &World) -> VersionedTexture {
    VersionedTexture::new(
        TextureImage::floor_map(query::maze_grid(world)),
        query::revisions(world).floor,
    )
}

fn progress_texture(world: &World) -> Result<VersionedTexture, RenderingError> {
    Ok(VersionedTexture::new(
        TextureImage::progress_strip(query::progress_buffer(world))?,
        query::revisions(world).progress,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_core::{MazeGrid, WorldPoint};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world() -> World {
        let grid = MazeGrid::parse("...\n.#.\n...").expect("layout parses");
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        World::from_grid(grid, 30.0, 2, &mut rng).expect("world builds")
    }

    #[test]
    fn scene_mirrors_walls_and_objects() {
        let world = world();
        let scene = build_scene(&world, 0.0).expect("scene builds");

        assert_eq!(scene.walls.len(), 1);
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.textures.floor_map.image.width(), 3);
        assert_eq!(scene.textures.progress.image.height(), 3);
        assert_eq!(scene.enclosure.plane_scale, 30.0);
    }

    #[test]
    fn pickups_refresh_objects_and_progress() {
        let mut world = world();
        let mut scene = build_scene(&world, 0.0).expect("scene builds");
        let target = query::objects(&world)[0].position();

        assert_eq!(world.try_pickup(target), Ok(true));
        refresh_scene(&world, &mut scene, 0.0).expect("scene refreshes");

        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.textures.progress.revision, 1);
        assert_eq!(&scene.textures.progress.image.pixels()[..4], &[5, 90, 90, 1]);
    }

    #[test]
    fn camera_follows_the_agent() {
        let world = world();
        let mut scene = build_scene(&world, 0.0).expect("scene builds");

        refresh_scene(&world, &mut scene, 0.5).expect("scene refreshes");

        let position = query::agent(&world).position;
        assert_eq!(scene.camera.eye.x, position.x);
        assert_eq!(scene.camera.eye.z, position.z);
        assert_eq!(scene.camera.target.y, 2.5);
        assert!(WorldPoint::new(scene.camera.eye.x, scene.camera.eye.z).distance(position) < 1e-6);
    }
}
