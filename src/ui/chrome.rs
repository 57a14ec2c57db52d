use bevy::prelude::*;

use super::animate::FadeSlideIn;
use crate::catalog::GalleryManifest;
use crate::constants::{
    ACCENT_CYAN, CHROME_BG, CHROME_ENTRANCE_SECS, HINT_ENTRANCE_DELAY_SECS, TEXT_MUTED,
    TEXT_PRIMARY,
};

#[derive(Component)]
pub struct HeaderChrome;

#[derive(Component)]
pub struct FooterChrome;

/// Footer button carrying the profile URL it opens.
#[derive(Component)]
pub struct SocialButton {
    pub url: String,
}

/// Header, footer and hint pill, spawned once the gallery is running. Each
/// plays a one-time entrance slide/fade and then sits still; the entrance is
/// independent of any interaction.
pub fn spawn_chrome(
    mut commands: Commands,
    manifest: Res<GalleryManifest>,
    asset_server: Res<AssetServer>,
) {
    // Header: portrait plus name and title, sliding down from above.
    commands
        .spawn((
            HeaderChrome,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                left: Val::Px(24.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                column_gap: Val::Px(16.0),
                padding: UiRect::all(Val::Px(16.0)),
                ..default()
            },
            BackgroundColor(CHROME_BG),
            BorderRadius::all(Val::Px(16.0)),
            FadeSlideIn::new(0.0, CHROME_ENTRANCE_SECS, -100.0, 24.0),
        ))
        .with_children(|parent| {
            parent.spawn((
                ImageNode::new(asset_server.load(manifest.owner.portrait.as_str())),
                Node {
                    width: Val::Px(72.0),
                    height: Val::Px(72.0),
                    ..default()
                },
                BorderRadius::MAX,
                FadeSlideIn::fade(0.0, CHROME_ENTRANCE_SECS),
            ));
            parent
                .spawn(Node {
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(2.0),
                    ..default()
                })
                .with_children(|column| {
                    column.spawn((
                        Text::new(manifest.owner.name.clone()),
                        TextFont {
                            font_size: 26.0,
                            ..default()
                        },
                        TextColor(ACCENT_CYAN),
                        FadeSlideIn::fade(0.0, CHROME_ENTRANCE_SECS),
                    ));
                    column.spawn((
                        Text::new(manifest.owner.title.clone()),
                        TextFont {
                            font_size: 15.0,
                            ..default()
                        },
                        TextColor(TEXT_MUTED),
                        FadeSlideIn::fade(0.0, CHROME_ENTRANCE_SECS),
                    ));
                });
        });

    // Footer: social-link pill, sliding up from below.
    commands
        .spawn((
            FooterChrome,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                width: Val::Percent(100.0),
                display: Display::Flex,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(12.0),
                        padding: UiRect::axes(Val::Px(20.0), Val::Px(10.0)),
                        ..default()
                    },
                    BackgroundColor(CHROME_BG),
                    BorderRadius::MAX,
                    FadeSlideIn::new(0.0, CHROME_ENTRANCE_SECS, 100.0, 0.0),
                ))
                .with_children(|pill| {
                    for link in &manifest.social_links {
                        pill.spawn((
                            Button,
                            SocialButton {
                                url: link.url.clone(),
                            },
                            Node {
                                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                                ..default()
                            },
                            BackgroundColor(Color::NONE),
                            BorderRadius::all(Val::Px(10.0)),
                        ))
                        .with_children(|button| {
                            button.spawn((
                                Text::new(link.label.clone()),
                                TextFont {
                                    font_size: 16.0,
                                    ..default()
                                },
                                TextColor(TEXT_PRIMARY),
                            ));
                        });
                    }
                });
        });

    // Hint pill above the footer, delayed so the gallery lands first.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(92.0),
                width: Val::Percent(100.0),
                display: Display::Flex,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        padding: UiRect::axes(Val::Px(14.0), Val::Px(5.0)),
                        ..default()
                    },
                    BackgroundColor(CHROME_BG),
                    BorderRadius::MAX,
                    FadeSlideIn::new(HINT_ENTRANCE_DELAY_SECS, CHROME_ENTRANCE_SECS, 20.0, 0.0),
                ))
                .with_children(|pill| {
                    pill.spawn((
                        Text::new("Click & drag to explore the gallery"),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(TEXT_MUTED),
                        FadeSlideIn::fade(HINT_ENTRANCE_DELAY_SECS, CHROME_ENTRANCE_SECS),
                    ));
                });
        });
}

// Footer buttons brighten on hover and open the profile in a new browsing
// context on press
pub fn social_button_interaction(
    mut buttons: Query<
        (&Interaction, &SocialButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
) {
    for (interaction, link, mut bg) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                *bg = BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.18));
                open_external(&link.url);
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.10)),
            Interaction::None => *bg = BackgroundColor(Color::NONE),
        }
    }
}

fn open_external(url: &str) {
    info!("Opening {url}");

    #[cfg(not(target_arch = "wasm32"))]
    if let Err(err) = webbrowser::open(url) {
        warn!("Failed to open {url}: {err}");
    }

    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        if window.open_with_url_and_target(url, "_blank").is_err() {
            warn!("Failed to open {url}");
        }
    }
}
