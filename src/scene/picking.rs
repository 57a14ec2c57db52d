use bevy::{prelude::*, window::PrimaryWindow};

use super::camera::OrbitCamera;
use super::exhibit::{ClickFlash, Exhibit, Hovered, PickBounds};
use crate::constants::CLICK_DRAG_TOLERANCE;
use crate::ui::{PointerCapture, ProjectSelected};

/// Ray test against an exhibit's oriented bounds: the ray is moved into the
/// exhibit's local space, so the entity's scale and yaw enlarge and tilt the
/// hit volume with the visual.
pub fn ray_hits_exhibit(origin: Vec3, dir: Vec3, xf: &GlobalTransform, size: Vec3) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let local_origin = inv.transform_point3(origin);
    let local_dir = inv.transform_vector3(dir);
    let half = size * 0.5;
    ray_aabb_hit_t(local_origin, local_dir, -half, half)
}

// Slab-method ray–AABB intersection, returns Some(t) or None
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let (mut tmin, mut tmax) = ((min.x - ray_origin.x) * inv.x, (max.x - ray_origin.x) * inv.x);
    if tmin > tmax {
        std::mem::swap(&mut tmin, &mut tmax);
    }

    let (mut tymin, mut tymax) = ((min.y - ray_origin.y) * inv.y, (max.y - ray_origin.y) * inv.y);
    if tymin > tymax {
        std::mem::swap(&mut tymin, &mut tymax);
    }

    if (tmin > tymax) || (tymin > tmax) {
        return None;
    }
    tmin = tmin.max(tymin);
    tmax = tmax.min(tymax);

    let (mut tzmin, mut tzmax) = ((min.z - ray_origin.z) * inv.z, (max.z - ray_origin.z) * inv.z);
    if tzmin > tzmax {
        std::mem::swap(&mut tzmin, &mut tzmax);
    }

    if (tmin > tzmax) || (tzmin > tmax) {
        return None;
    }
    tmin = tmin.max(tzmin);
    tmax = tmax.min(tzmax);

    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Maintain the `Hovered` marker on whichever exhibit the cursor ray hits
/// nearest, clearing everything while the pointer is captured by the UI.
pub fn update_hovered_exhibit(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    pointer: Res<PointerCapture>,
    exhibits: Query<(Entity, &GlobalTransform, &PickBounds, Option<&Hovered>), With<Exhibit>>,
    mut commands: Commands,
) {
    let mut hit: Option<(Entity, f32)> = None;
    if !pointer.0 {
        if let (Ok(window), Ok((cam_xf, camera))) = (windows.single(), cameras.single()) {
            if let Some(cursor_pos) = window.cursor_position() {
                if let Ok(ray) = camera.viewport_to_world(cam_xf, cursor_pos) {
                    let origin = ray.origin;
                    let dir = ray.direction.as_vec3();
                    for (entity, xf, PickBounds(size), _) in &exhibits {
                        if let Some(t) = ray_hits_exhibit(origin, dir, xf, *size) {
                            if t > 0.0 && hit.is_none_or(|(_, best)| t < best) {
                                hit = Some((entity, t));
                            }
                        }
                    }
                }
            }
        }
    }

    for (entity, _, _, hovered) in &exhibits {
        let is_hit = hit.is_some_and(|(e, _)| e == entity);
        match (is_hit, hovered.is_some()) {
            (true, false) => {
                commands.entity(entity).insert(Hovered);
            }
            (false, true) => {
                commands.entity(entity).remove::<Hovered>();
            }
            _ => {}
        }
    }
}

/// Treat a left release as a pick when the press never turned into an orbit
/// drag. A hit selects the project and starts that exhibit's pop; the orbit
/// control owns everything else.
pub fn click_to_select(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&GlobalTransform, &Camera), With<Camera3d>>,
    orbit: Res<OrbitCamera>,
    pointer: Res<PointerCapture>,
    exhibits: Query<(Entity, &Exhibit, &GlobalTransform, &PickBounds)>,
    mut selected: EventWriter<ProjectSelected>,
    mut commands: Commands,
) {
    if !buttons.just_released(MouseButton::Left) || pointer.0 {
        return;
    }
    if orbit.drag_distance > CLICK_DRAG_TOLERANCE {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((cam_xf, camera)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_xf, cursor_pos) else {
        return;
    };

    let origin = ray.origin;
    let dir = ray.direction.as_vec3();
    let mut best: Option<(Entity, crate::catalog::ProjectId, f32)> = None;
    for (entity, exhibit, xf, PickBounds(size)) in &exhibits {
        if let Some(t) = ray_hits_exhibit(origin, dir, xf, *size) {
            if t > 0.0 && best.is_none_or(|(_, _, bt)| t < bt) {
                best = Some((entity, exhibit.project, t));
            }
        }
    }

    if let Some((entity, project, _)) = best {
        selected.write(ProjectSelected(project));
        commands.entity(entity).insert(ClickFlash::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Vec3 {
        Vec3::new(2.0, 1.236, 0.2)
    }

    #[test]
    fn straight_ray_hits_a_centred_exhibit() {
        let xf = GlobalTransform::from(Transform::IDENTITY);
        let t = ray_hits_exhibit(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, &xf, bounds());
        assert!((t.unwrap() - 4.9).abs() < 1e-4);
    }

    #[test]
    fn offset_ray_misses() {
        let xf = GlobalTransform::from(Transform::IDENTITY);
        let t = ray_hits_exhibit(Vec3::new(5.0, 0.0, 5.0), Vec3::NEG_Z, &xf, bounds());
        assert!(t.is_none());
    }

    #[test]
    fn nearest_of_two_overlapping_exhibits_wins() {
        let near = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 1.0));
        let far = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -1.0));
        let origin = Vec3::new(0.0, 0.0, 5.0);
        let t_near = ray_hits_exhibit(origin, Vec3::NEG_Z, &near, bounds()).unwrap();
        let t_far = ray_hits_exhibit(origin, Vec3::NEG_Z, &far, bounds()).unwrap();
        assert!(t_near < t_far);
    }

    #[test]
    fn hover_scale_enlarges_the_hit_area() {
        let idle = GlobalTransform::from(Transform::IDENTITY);
        let grown = GlobalTransform::from(Transform::from_scale(Vec3::splat(2.0)));
        // x = 1.5 lies outside the idle half-width (1.0) but inside the
        // scaled one (2.0).
        let origin = Vec3::new(1.5, 0.0, 5.0);
        assert!(ray_hits_exhibit(origin, Vec3::NEG_Z, &idle, bounds()).is_none());
        assert!(ray_hits_exhibit(origin, Vec3::NEG_Z, &grown, bounds()).is_some());
    }

    #[test]
    fn ray_starting_inside_reports_the_exit_face() {
        let t = ray_aabb_hit_t(Vec3::ZERO, Vec3::Z, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!((t.unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ray_behind_the_box_misses() {
        let t = ray_aabb_hit_t(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }
}
