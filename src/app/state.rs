use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::catalog::GalleryManifest;
use crate::constants::RELATIVE_MANIFEST_PATH;
use crate::scene::GalleryCreated;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub pending_images: Vec<Handle<Image>>,
    pub images_resolved: bool,
}

#[derive(Resource, Default)]
pub struct ManifestLoader {
    pub handle: Option<Handle<GalleryManifest>>,
}

// Start the loading process
pub fn start_loading(mut loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading gallery manifest from {RELATIVE_MANIFEST_PATH}");
    loader.handle = Some(asset_server.load(RELATIVE_MANIFEST_PATH));
}

/// Mirror the manifest asset into a resource once it arrives, normalise the
/// special flag and kick off every referenced image load.
pub fn load_manifest_system(
    mut progress: ResMut<LoadingProgress>,
    loader: Res<ManifestLoader>,
    manifests: Res<Assets<GalleryManifest>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if progress.manifest_loaded {
        return;
    }
    let Some(handle) = &loader.handle else {
        return;
    };
    let Some(manifest) = manifests.get(handle) else {
        return;
    };

    let mut manifest = manifest.clone();
    let demoted = manifest.normalise_special_flags();
    if demoted > 0 {
        warn!("Catalogue flags {demoted} extra special project(s); keeping the first");
    }

    progress.pending_images = manifest
        .projects
        .iter()
        .map(|project| asset_server.load(project.image.as_str()))
        .collect();
    progress
        .pending_images
        .push(asset_server.load(manifest.owner.portrait.as_str()));

    info!(
        "✓ Gallery manifest loaded: {} projects, {} images pending",
        manifest.projects.len(),
        progress.pending_images.len()
    );
    commands.insert_resource(manifest);
    progress.manifest_loaded = true;
}

/// Wait for every image to settle. A failed load is settled too: the quad
/// falls back to the engine's placeholder texture instead of blocking the
/// gallery forever.
pub fn check_image_loading(
    mut progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
) {
    if !progress.manifest_loaded || progress.images_resolved {
        return;
    }

    let all_settled = progress.pending_images.iter().all(|handle| {
        matches!(
            asset_server.load_state(handle),
            LoadState::Loaded | LoadState::Failed(_)
        )
    });
    if !all_settled {
        return;
    }

    for handle in &progress.pending_images {
        if let LoadState::Failed(err) = asset_server.load_state(handle) {
            warn!("Image failed to load, using fallback: {err}");
        }
    }
    progress.images_resolved = true;
}

pub fn transition_to_running(
    progress: Res<LoadingProgress>,
    gallery: Res<GalleryCreated>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if progress.manifest_loaded && progress.images_resolved && gallery.created {
        info!("→ Transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
