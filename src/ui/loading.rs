use bevy::prelude::*;
use bevy::ui::GlobalZIndex;

use crate::constants::{ACCENT_CYAN, CLEAR_COLOUR, SPINNER_FRAME_SECS, TEXT_MUTED};

const SPINNER_FRAMES: [&str; 6] = ["◜", "◠", "◝", "◞", "◡", "◟"];

#[derive(Component)]
pub struct LoadingScreen;

#[derive(Component)]
pub struct LoadingSpinner {
    timer: Timer,
    frame: usize,
}

/// Opaque cover shown from the first frame. It stays up until the manifest
/// and every referenced image have resolved; if the engine never gets there,
/// it stays up indefinitely rather than crashing the page.
pub fn spawn_loading_screen(mut commands: Commands) {
    commands
        .spawn((
            LoadingScreen,
            GlobalZIndex(100),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(CLEAR_COLOUR),
        ))
        .with_children(|parent| {
            parent.spawn((
                LoadingSpinner {
                    timer: Timer::from_seconds(SPINNER_FRAME_SECS, TimerMode::Repeating),
                    frame: 0,
                },
                Text::new(SPINNER_FRAMES[0]),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(ACCENT_CYAN),
            ));
            parent.spawn((
                Text::new("Loading 3D Experience..."),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_MUTED),
            ));
        });
}

pub fn animate_loading_spinner(
    time: Res<Time>,
    mut spinners: Query<(&mut LoadingSpinner, &mut Text)>,
) {
    for (mut spinner, mut text) in &mut spinners {
        if spinner.timer.tick(time.delta()).just_finished() {
            spinner.frame = (spinner.frame + 1) % SPINNER_FRAMES.len();
            *text = Text::new(SPINNER_FRAMES[spinner.frame]);
        }
    }
}

pub fn despawn_loading_screen(
    screens: Query<Entity, With<LoadingScreen>>,
    mut commands: Commands,
) {
    for entity in &screens {
        commands.entity(entity).despawn();
    }
}
