use bevy::prelude::*;

pub const RELATIVE_MANIFEST_PATH: &'static str = "gallery.json";

// Exhibit layout
pub const GOLDEN_RATIO: f32 = 1.618;
pub const EXHIBIT_SPACING: f32 = 3.5;
pub const SPECIAL_ROW_OFFSET_Z: f32 = -1.0;
pub const EXHIBIT_WIDTH: f32 = 2.0;
pub const SPECIAL_EXHIBIT_WIDTH: f32 = 3.0;
pub const CAPTION_GAP: f32 = 0.3;
pub const CAPTION_SLOT_WIDTH: f32 = 240.0;

// Exhibit interaction feedback
pub const EXHIBIT_SMOOTHING: f32 = 0.1;
pub const HOVER_LIFT: f32 = 0.2;
pub const HOVER_SCALE: f32 = 1.15;
pub const CLICK_SCALE: f32 = 1.25;
pub const HOVER_YAW: f32 = -0.1;
pub const HOVER_EMISSIVE: f32 = 0.3;
pub const CLICK_FLASH_SECS: f32 = 0.2;
pub const EXHIBIT_PICK_DEPTH: f32 = 0.2;

// Orbit camera. The elevation band is zero-width: min == max locks the
// viewing height so the camera can never dip above or below the exhibit row.
pub const CAMERA_FOV_DEGREES: f32 = 35.0;
pub const ORBIT_ELEVATION_MIN: f32 = core::f32::consts::PI / 10.0;
pub const ORBIT_ELEVATION_MAX: f32 = core::f32::consts::PI / 10.0;
pub const ORBIT_DISTANCE_MIN: f32 = 3.0;
pub const ORBIT_DISTANCE_MAX: f32 = 12.0;
pub const ORBIT_START_DISTANCE: f32 = 10.0;
pub const ORBIT_DRAG_SENSITIVITY: f32 = 0.005;
pub const ORBIT_FOLLOW_SPEED: f32 = 12.0;
pub const CLICK_DRAG_TOLERANCE: f32 = 5.0;

// Lighting (fixed, not data-driven)
pub const AMBIENT_BRIGHTNESS: f32 = 60.0;
pub const POINT_LIGHT_INTENSITY: f32 = 2_000_000.0;
pub const LIGHT_VIOLET: Color = Color::srgb(0.43, 0.27, 1.0);
pub const LIGHT_CYAN: Color = Color::srgb(0.0, 1.0, 1.0);

// UI timing
pub const CHROME_ENTRANCE_SECS: f32 = 0.8;
pub const HINT_ENTRANCE_DELAY_SECS: f32 = 1.0;
pub const BACKDROP_FADE_SECS: f32 = 0.4;
pub const CONTENT_REVEAL_SECS: f32 = 0.4;
pub const CONTENT_STAGGER_SECS: f32 = 0.1;
pub const OVERLAY_EXIT_SECS: f32 = 0.2;
pub const SPINNER_FRAME_SECS: f32 = 0.1;

// UI palette
pub const ACCENT_CYAN: Color = Color::srgb(0.45, 0.91, 1.0);
pub const TEXT_PRIMARY: Color = Color::srgb(0.92, 0.93, 0.95);
pub const TEXT_MUTED: Color = Color::srgb(0.72, 0.74, 0.78);
pub const CHROME_BG: Color = Color::srgba(0.0, 0.0, 0.0, 0.30);
pub const BACKDROP_BG: Color = Color::srgba(0.0, 0.0, 0.0, 0.70);
pub const PANEL_BG: Color = Color::srgba(0.12, 0.13, 0.17, 0.80);
pub const PANEL_BORDER: Color = Color::srgb(0.25, 0.27, 0.32);
pub const TAG_BG: Color = Color::srgba(0.31, 0.27, 0.90, 0.30);
pub const TAG_TEXT: Color = Color::srgb(0.78, 0.76, 0.98);
pub const CLEAR_COLOUR: Color = Color::srgb(0.04, 0.04, 0.09);
