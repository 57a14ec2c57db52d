//! 3D gallery composition.
//!
//! The scene is static for the session: two coloured point lights plus a low
//! ambient term, one textured exhibit quad per catalogue project at its
//! layout position, and an orbit camera constrained to the gallery's viewing
//! band. Exhibits are spawned once, the first frame the gallery manifest
//! asset has resolved; nothing is added or removed afterwards. All motion is
//! per-entity pose smoothing driven from `Update`.

pub mod camera;
pub mod exhibit;
pub mod picking;

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::catalog::GalleryManifest;
use crate::catalog::layout::layout_exhibits;
use crate::constants::{
    AMBIENT_BRIGHTNESS, CAPTION_GAP, CAPTION_SLOT_WIDTH, EXHIBIT_PICK_DEPTH, LIGHT_CYAN,
    LIGHT_VIOLET, POINT_LIGHT_INTENSITY, TEXT_PRIMARY,
};
use camera::{OrbitCamera, camera_controller, spawn_camera};
use exhibit::{
    Exhibit, ExhibitBase, ExhibitCaption, PickBounds, animate_exhibit_poses, exhibit_size,
    position_exhibit_captions, tick_click_flashes, update_hover_emissive,
};
use picking::{click_to_select, update_hovered_exhibit};

/// Latch so the exhibit set is composed exactly once per session.
#[derive(Resource, Default)]
pub struct GalleryCreated {
    pub created: bool,
}

pub struct GalleryScenePlugin;

impl Plugin for GalleryScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalleryCreated>()
            .init_resource::<OrbitCamera>()
            .add_systems(Startup, (spawn_lighting, spawn_camera))
            .add_systems(Update, spawn_gallery_when_ready)
            .add_systems(
                Update,
                (
                    camera_controller,
                    update_hovered_exhibit,
                    click_to_select,
                    animate_exhibit_poses,
                    tick_click_flashes,
                    update_hover_emissive,
                    position_exhibit_captions,
                )
                    .run_if(in_state(AppState::Running)),
            );
    }
}

/// Fixed gallery lighting; intensities and colours are not data-driven.
fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    commands.spawn((
        PointLight {
            color: LIGHT_VIOLET,
            intensity: POINT_LIGHT_INTENSITY,
            range: 60.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 2.0, 5.0),
    ));
    commands.spawn((
        PointLight {
            color: LIGHT_CYAN,
            intensity: POINT_LIGHT_INTENSITY,
            range: 60.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, -2.0, -5.0),
    ));
}

/// Compose the exhibit row once the manifest asset has resolved. Each
/// project becomes a textured quad plus a screen-space caption pinned under
/// it every frame.
pub fn spawn_gallery_when_ready(
    mut created: ResMut<GalleryCreated>,
    manifest: Option<Res<GalleryManifest>>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    if created.created {
        return;
    }
    let Some(manifest) = manifest else {
        return;
    };

    for placement in layout_exhibits(&manifest) {
        let Some(project) = manifest.project(placement.project) else {
            continue;
        };
        let size = exhibit_size(placement.special);

        let entity = commands
            .spawn((
                Exhibit {
                    project: project.id,
                    special: placement.special,
                },
                ExhibitBase(placement.position),
                PickBounds(Vec3::new(size.x, size.y, EXHIBIT_PICK_DEPTH)),
                Mesh3d(meshes.add(Rectangle::new(size.x, size.y))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color_texture: Some(asset_server.load(project.image.as_str())),
                    cull_mode: None,
                    ..default()
                })),
                Transform::from_translation(placement.position),
            ))
            .id();

        commands
            .spawn((
                ExhibitCaption {
                    exhibit: entity,
                    local_anchor: Vec3::new(0.0, -(size.y / 2.0) - CAPTION_GAP, 0.1),
                },
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(CAPTION_SLOT_WIDTH),
                    justify_content: JustifyContent::Center,
                    // Hidden until the first projection pass places it.
                    display: Display::None,
                    ..default()
                },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new(project.title.clone()),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(TEXT_PRIMARY),
                ));
            });
    }

    created.created = true;
    info!("Gallery composed with {} exhibits", manifest.projects.len());
}
