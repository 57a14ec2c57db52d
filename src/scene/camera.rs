use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};

use crate::constants::{
    CAMERA_FOV_DEGREES, ORBIT_DISTANCE_MAX, ORBIT_DISTANCE_MIN, ORBIT_DRAG_SENSITIVITY,
    ORBIT_ELEVATION_MAX, ORBIT_ELEVATION_MIN, ORBIT_FOLLOW_SPEED, ORBIT_START_DISTANCE,
};
use crate::ui::PointerCapture;

/// Orbit state around the gallery origin. Yaw is free, elevation is clamped
/// to the fixed viewing band, distance to the zoom range. There is no pan:
/// the focus point never moves.
#[derive(Resource)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub elevation: f32,
    pub distance: f32,
    /// Pixels of cumulative motion since the press began; a release below
    /// the click tolerance counts as a pick instead of an orbit.
    pub drag_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            elevation: ORBIT_ELEVATION_MIN,
            distance: ORBIT_START_DISTANCE,
            drag_distance: 0.0,
        }
    }
}

impl OrbitCamera {
    pub fn apply_drag(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_DRAG_SENSITIVITY;
        self.elevation += delta.y * ORBIT_DRAG_SENSITIVITY;
        self.clamp_constraints();
    }

    pub fn apply_zoom(&mut self, scroll_y: f32) {
        let zoom_factor = if scroll_y > 0.0 { 0.9 } else { 1.1 };
        self.distance = (self.distance * zoom_factor).clamp(ORBIT_DISTANCE_MIN, ORBIT_DISTANCE_MAX);
    }

    pub fn clamp_constraints(&mut self) {
        self.elevation = self.elevation.clamp(ORBIT_ELEVATION_MIN, ORBIT_ELEVATION_MAX);
        self.distance = self.distance.clamp(ORBIT_DISTANCE_MIN, ORBIT_DISTANCE_MAX);
    }

    /// Camera transform on the orbit sphere, looking at the origin.
    pub fn transform(&self) -> Transform {
        let rotation = Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(-self.elevation);
        let position = rotation * Vec3::new(0.0, 0.0, self.distance);
        Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

pub fn spawn_camera(mut commands: Commands, orbit: Res<OrbitCamera>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        orbit.transform(),
    ));
}

/// Left-drag orbits, wheel zooms, both suppressed while the pointer is
/// captured by the UI. The transform follows the orbit state with the usual
/// smoothed pursuit.
pub fn camera_controller(
    mut cameras: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    pointer: Res<PointerCapture>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = cameras.single_mut() else {
        return;
    };

    for scroll in scroll_events.read() {
        if !pointer.0 {
            orbit.apply_zoom(scroll.y);
        }
    }

    if buttons.just_pressed(MouseButton::Left) {
        orbit.drag_distance = 0.0;
    }

    let total_motion: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if buttons.pressed(MouseButton::Left) && !pointer.0 && total_motion != Vec2::ZERO {
        orbit.drag_distance += total_motion.length();
        orbit.apply_drag(total_motion);
    }

    let target = orbit.transform();
    let lerp_speed = (ORBIT_FOLLOW_SPEED * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform.translation.lerp(target.translation, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target.rotation, lerp_speed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped_to_the_distance_range() {
        let mut orbit = OrbitCamera::default();
        for _ in 0..100 {
            orbit.apply_zoom(1.0);
        }
        assert_eq!(orbit.distance, ORBIT_DISTANCE_MIN);
        for _ in 0..100 {
            orbit.apply_zoom(-1.0);
        }
        assert_eq!(orbit.distance, ORBIT_DISTANCE_MAX);
    }

    #[test]
    fn elevation_never_leaves_the_viewing_band() {
        let mut orbit = OrbitCamera::default();
        orbit.apply_drag(Vec2::new(0.0, 500.0));
        assert!(orbit.elevation <= ORBIT_ELEVATION_MAX);
        orbit.apply_drag(Vec2::new(0.0, -500.0));
        assert!(orbit.elevation >= ORBIT_ELEVATION_MIN);
    }

    #[test]
    fn horizontal_drag_orbits_freely() {
        let mut orbit = OrbitCamera::default();
        let before = orbit.yaw;
        orbit.apply_drag(Vec2::new(120.0, 0.0));
        assert!((orbit.yaw - (before - 120.0 * ORBIT_DRAG_SENSITIVITY)).abs() < 1e-6);
    }

    #[test]
    fn transform_stays_on_the_orbit_sphere_looking_at_origin() {
        let mut orbit = OrbitCamera::default();
        orbit.apply_drag(Vec2::new(73.0, -12.0));
        orbit.apply_zoom(1.0);
        let transform = orbit.transform();
        assert!((transform.translation.length() - orbit.distance).abs() < 1e-4);
        let toward_origin = (-transform.translation).normalize();
        let forward = transform.forward();
        assert!(forward.dot(toward_origin) > 0.9999);
    }
}
