use bevy::prelude::*;

use crate::catalog::ProjectId;
use crate::constants::{
    CAPTION_SLOT_WIDTH, CLICK_FLASH_SECS, CLICK_SCALE, EXHIBIT_SMOOTHING, EXHIBIT_WIDTH,
    GOLDEN_RATIO, HOVER_EMISSIVE, HOVER_LIFT, HOVER_SCALE, HOVER_YAW, SPECIAL_EXHIBIT_WIDTH,
};

/// One interactive exhibit bound to a single catalogue project.
#[derive(Component)]
pub struct Exhibit {
    pub project: ProjectId,
    pub special: bool,
}

/// Layout slot the pose animation settles back into when idle.
#[derive(Component)]
pub struct ExhibitBase(pub Vec3);

/// Half-extent box for the picking raycast. Tested through the entity's
/// global transform, so hover growth enlarges the hit area with the quad.
#[derive(Component)]
pub struct PickBounds(pub Vec3);

/// Maintained by the picking system while the cursor ray hits this exhibit.
#[derive(Component)]
pub struct Hovered;

/// Short pop after a click; removed when the timer runs out. Each exhibit
/// owns its own timer, so overlapping clicks on different exhibits never
/// interfere.
#[derive(Component)]
pub struct ClickFlash(pub Timer);

impl ClickFlash {
    pub fn new() -> Self {
        Self(Timer::from_seconds(CLICK_FLASH_SECS, TimerMode::Once))
    }
}

/// Screen-space caption re-anchored below its exhibit every frame.
#[derive(Component)]
pub struct ExhibitCaption {
    pub exhibit: Entity,
    /// Anchor in the exhibit's local space, just under the image's bottom
    /// edge. Projected with the exhibit's full transform so lift, yaw and
    /// scale carry the caption along.
    pub local_anchor: Vec3,
}

/// Image quad size. Width is fixed per tier; height preserves the golden
/// ratio either way.
pub fn exhibit_size(special: bool) -> Vec2 {
    let width = if special {
        SPECIAL_EXHIBIT_WIDTH
    } else {
        EXHIBIT_WIDTH
    };
    Vec2::new(width, width / GOLDEN_RATIO)
}

/// Target pose (y, uniform scale, yaw) for the current interaction state.
/// Clicked takes precedence over hovered for scale; lift and yaw follow
/// hover alone.
pub fn target_pose(base_y: f32, hovered: bool, clicked: bool) -> (f32, f32, f32) {
    let y = if hovered { base_y + HOVER_LIFT } else { base_y };
    let scale = if clicked {
        CLICK_SCALE
    } else if hovered {
        HOVER_SCALE
    } else {
        1.0
    };
    let yaw = if hovered { HOVER_YAW } else { 0.0 };
    (y, scale, yaw)
}

/// Move a fixed fraction of the remaining distance toward the target.
/// Applied once per rendered frame, deliberately without delta-time
/// compensation, so the perceived feel matches the reference gallery.
pub fn approach(current: f32, target: f32, fraction: f32) -> f32 {
    current + (target - current) * fraction
}

/// Per-frame pose smoothing toward the interaction-derived target.
pub fn animate_exhibit_poses(
    mut exhibits: Query<
        (
            &mut Transform,
            &ExhibitBase,
            Option<&Hovered>,
            Option<&ClickFlash>,
        ),
        With<Exhibit>,
    >,
) {
    for (mut transform, base, hovered, flash) in &mut exhibits {
        let (target_y, target_scale, target_yaw) =
            target_pose(base.0.y, hovered.is_some(), flash.is_some());

        transform.translation.y = approach(transform.translation.y, target_y, EXHIBIT_SMOOTHING);
        transform.scale = transform
            .scale
            .lerp(Vec3::splat(target_scale), EXHIBIT_SMOOTHING);
        transform.rotation = transform
            .rotation
            .slerp(Quat::from_rotation_y(target_yaw), EXHIBIT_SMOOTHING);
    }
}

/// Expire click pops independently per exhibit.
pub fn tick_click_flashes(
    time: Res<Time>,
    mut flashes: Query<(Entity, &mut ClickFlash), With<Exhibit>>,
    mut commands: Commands,
) {
    for (entity, mut flash) in &mut flashes {
        if flash.0.tick(time.delta()).finished() {
            commands.entity(entity).remove::<ClickFlash>();
        }
    }
}

/// Raise the material's emissive term while hovered, drop it on leave.
pub fn update_hover_emissive(
    hovered: Query<&MeshMaterial3d<StandardMaterial>, (With<Exhibit>, Added<Hovered>)>,
    mut unhovered: RemovedComponents<Hovered>,
    handles: Query<&MeshMaterial3d<StandardMaterial>, With<Exhibit>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for handle in &hovered {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.emissive = LinearRgba::WHITE * HOVER_EMISSIVE;
        }
    }
    for entity in unhovered.read() {
        if let Ok(handle) = handles.get(entity) {
            if let Some(material) = materials.get_mut(&handle.0) {
                material.emissive = LinearRgba::BLACK;
            }
        }
    }
}

/// Project each caption's world anchor into the viewport and pin its UI node
/// there. Captions whose anchor falls behind the camera are hidden.
pub fn position_exhibit_captions(
    exhibits: Query<&GlobalTransform, With<Exhibit>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut captions: Query<(&ExhibitCaption, &mut Node)>,
) {
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    for (caption, mut node) in &mut captions {
        let Ok(exhibit_transform) = exhibits.get(caption.exhibit) else {
            continue;
        };
        let anchor = exhibit_transform.transform_point(caption.local_anchor);
        match camera.world_to_viewport(camera_transform, anchor) {
            Ok(screen) => {
                node.display = Display::Flex;
                node.left = Val::Px(screen.x - CAPTION_SLOT_WIDTH / 2.0);
                node.top = Val::Px(screen.y);
            }
            Err(_) => node.display = Display::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn clicked_takes_precedence_over_hover_for_scale() {
        let (_, idle_scale, _) = target_pose(0.0, false, false);
        let (_, hover_scale, _) = target_pose(0.0, true, false);
        let (_, click_scale, _) = target_pose(0.0, true, true);
        assert_eq!(idle_scale, 1.0);
        assert_eq!(hover_scale, HOVER_SCALE);
        assert_eq!(click_scale, CLICK_SCALE);
        // A click without hover still pops.
        assert_eq!(target_pose(0.0, false, true).1, CLICK_SCALE);
    }

    #[test]
    fn hover_lifts_and_yaws() {
        let (y, _, yaw) = target_pose(0.5, true, false);
        assert_eq!(y, 0.5 + HOVER_LIFT);
        assert_eq!(yaw, HOVER_YAW);
        let (y, _, yaw) = target_pose(0.5, false, false);
        assert_eq!(y, 0.5);
        assert_eq!(yaw, 0.0);
    }

    #[test]
    fn approach_converges_monotonically_without_overshoot() {
        let target: f32 = 1.0;
        let mut current = 0.0;
        let mut previous_gap = (target - current).abs();
        for _ in 0..100 {
            current = approach(current, target, EXHIBIT_SMOOTHING);
            let gap = (target - current).abs();
            assert!(gap < previous_gap, "each frame strictly closes the gap");
            assert!(current <= target, "exponential approach never overshoots");
            previous_gap = gap;
        }
        assert!(previous_gap < 1e-3);

        // Same property approaching from above.
        let mut current = 2.0;
        for _ in 0..100 {
            current = approach(current, target, EXHIBIT_SMOOTHING);
            assert!(current >= target);
        }
    }

    #[test]
    fn click_flash_expires_after_the_fixed_delay() {
        let mut flash = ClickFlash::new();
        flash.0.tick(Duration::from_millis(150));
        assert!(!flash.0.finished(), "still popping before the delay");
        flash.0.tick(Duration::from_millis(100));
        assert!(flash.0.finished(), "cleared shortly after ~200ms");
    }

    #[test]
    fn special_exhibits_share_the_aspect_ratio() {
        let ordinary = exhibit_size(false);
        let special = exhibit_size(true);
        assert!(special.x > ordinary.x);
        let ordinary_ratio = ordinary.x / ordinary.y;
        let special_ratio = special.x / special.y;
        assert!((ordinary_ratio - special_ratio).abs() < 1e-5);
        assert!((ordinary_ratio - GOLDEN_RATIO).abs() < 1e-5);
    }
}
