//! Project detail overlay.
//!
//! Spawned while the shell's selection is non-null and torn down when it
//! clears. Presentation sequencing only: the backdrop fades first, the
//! content blocks then slide in staggered, and dismissal runs a quicker
//! uniform fade before the tree is despawned. Dismissal paths are the
//! backdrop, the close control and Escape; presses inside the content panel
//! are swallowed by the panel's own focus and never reach the backdrop.

use bevy::prelude::*;
use bevy::ui::{FocusPolicy, GlobalZIndex};

use super::animate::{FadeSlideIn, ease_out_cubic};
use super::{OverlayDismissed, SelectedProject};
use crate::catalog::GalleryManifest;
use crate::constants::{
    ACCENT_CYAN, BACKDROP_BG, BACKDROP_FADE_SECS, CONTENT_REVEAL_SECS, CONTENT_STAGGER_SECS,
    GOLDEN_RATIO, OVERLAY_EXIT_SECS, PANEL_BG, PANEL_BORDER, TAG_BG, TAG_TEXT, TEXT_MUTED,
    TEXT_PRIMARY,
};

#[derive(Component)]
pub struct OverlayRoot;

/// The translucent full-screen layer; pressing it dismisses.
#[derive(Component)]
pub struct OverlayBackdrop;

/// The content panel; blocks presses from falling through to the backdrop.
#[derive(Component)]
pub struct OverlayPanel;

#[derive(Component)]
pub struct OverlayCloseButton;

/// Backdrop alpha ramp, run before the content stagger starts.
#[derive(Component)]
pub struct BackdropFade(pub Timer);

/// Exit clock on the root; when it runs out the whole tree despawns.
#[derive(Component)]
pub struct OverlayClosing(pub Timer);

/// Alphas captured at dismissal so the uniform fade-out scales whatever each
/// node had reached, mid-entrance or settled.
#[derive(Component)]
pub struct FadeOut {
    bg: Option<f32>,
    border: Option<f32>,
    text: Option<f32>,
    image: Option<f32>,
}

/// Content blocks reveal in catalogue order once the backdrop has landed.
pub fn reveal_delay(index: usize) -> f32 {
    BACKDROP_FADE_SECS + index as f32 * CONTENT_STAGGER_SECS
}

fn reveal(index: usize) -> FadeSlideIn {
    FadeSlideIn::new(reveal_delay(index), CONTENT_REVEAL_SECS, 20.0, 0.0)
}

/// Build the overlay tree when the selection lands on a project. Any
/// still-fading remnant of a previous overlay is replaced outright.
pub fn spawn_overlay_on_selection(
    selection: Res<SelectedProject>,
    manifest: Option<Res<GalleryManifest>>,
    existing: Query<Entity, With<OverlayRoot>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if !selection.is_changed() {
        return;
    }
    let Some(id) = selection.0 else {
        return;
    };
    let Some(manifest) = manifest else {
        return;
    };
    let Some(project) = manifest.project(id) else {
        warn!("Selection {} has no catalogue entry", id.0);
        return;
    };

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let image_width = 320.0;
    commands
        .spawn((
            OverlayRoot,
            OverlayBackdrop,
            GlobalZIndex(50),
            Interaction::default(),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                padding: UiRect::all(Val::Px(24.0)),
                ..default()
            },
            BackgroundColor(BACKDROP_BG.with_alpha(0.0)),
            BackdropFade(Timer::from_seconds(BACKDROP_FADE_SECS, TimerMode::Once)),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    OverlayPanel,
                    Interaction::default(),
                    FocusPolicy::Block,
                    Node {
                        display: Display::Flex,
                        flex_direction: FlexDirection::Row,
                        max_width: Val::Px(900.0),
                        column_gap: Val::Px(24.0),
                        padding: UiRect::all(Val::Px(28.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        overflow: Overflow::clip(),
                        ..default()
                    },
                    BackgroundColor(PANEL_BG),
                    BorderColor(PANEL_BORDER),
                    BorderRadius::all(Val::Px(18.0)),
                    reveal(0),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        ImageNode::new(asset_server.load(project.image.as_str())),
                        Node {
                            width: Val::Px(image_width),
                            height: Val::Px(image_width / GOLDEN_RATIO),
                            flex_shrink: 0.0,
                            ..default()
                        },
                        BorderRadius::all(Val::Px(12.0)),
                        reveal(1),
                    ));

                    panel
                        .spawn(Node {
                            display: Display::Flex,
                            flex_direction: FlexDirection::Column,
                            row_gap: Val::Px(14.0),
                            max_width: Val::Px(460.0),
                            ..default()
                        })
                        .with_children(|column| {
                            column.spawn((
                                Text::new(project.title.clone()),
                                TextFont {
                                    font_size: 30.0,
                                    ..default()
                                },
                                TextColor(ACCENT_CYAN),
                                reveal(2),
                            ));
                            column.spawn((
                                Text::new(project.description.clone()),
                                TextFont {
                                    font_size: 16.0,
                                    ..default()
                                },
                                TextColor(TEXT_PRIMARY),
                                reveal(3),
                            ));
                            column.spawn((
                                Text::new("Technologies Used:"),
                                TextFont {
                                    font_size: 18.0,
                                    ..default()
                                },
                                TextColor(TEXT_MUTED),
                                reveal(4),
                            ));
                            column
                                .spawn(Node {
                                    display: Display::Flex,
                                    flex_wrap: FlexWrap::Wrap,
                                    column_gap: Val::Px(8.0),
                                    row_gap: Val::Px(8.0),
                                    ..default()
                                })
                                .with_children(|tags| {
                                    // Catalogue order, one pill per tag.
                                    for (index, tag) in project.technologies.iter().enumerate() {
                                        tags.spawn((
                                            Node {
                                                padding: UiRect::axes(
                                                    Val::Px(12.0),
                                                    Val::Px(4.0),
                                                ),
                                                ..default()
                                            },
                                            BackgroundColor(TAG_BG),
                                            BorderRadius::MAX,
                                            reveal(5 + index),
                                        ))
                                        .with_children(|pill| {
                                            pill.spawn((
                                                Text::new(tag.clone()),
                                                TextFont {
                                                    font_size: 14.0,
                                                    ..default()
                                                },
                                                TextColor(TAG_TEXT),
                                                FadeSlideIn::fade(
                                                    reveal_delay(5 + index),
                                                    CONTENT_REVEAL_SECS,
                                                ),
                                            ));
                                        });
                                    }
                                });
                        });

                    panel
                        .spawn((
                            OverlayCloseButton,
                            Button,
                            Node {
                                position_type: PositionType::Absolute,
                                top: Val::Px(12.0),
                                right: Val::Px(12.0),
                                width: Val::Px(32.0),
                                height: Val::Px(32.0),
                                display: Display::Flex,
                                align_items: AlignItems::Center,
                                justify_content: JustifyContent::Center,
                                ..default()
                            },
                            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.08)),
                            BorderRadius::MAX,
                        ))
                        .with_children(|button| {
                            button.spawn((
                                Text::new("✕"),
                                TextFont {
                                    font_size: 18.0,
                                    ..default()
                                },
                                TextColor(TEXT_MUTED),
                            ));
                        });
                });
        });
}

pub fn backdrop_interaction(
    backdrops: Query<&Interaction, (Changed<Interaction>, With<OverlayBackdrop>)>,
    mut dismissed: EventWriter<OverlayDismissed>,
) {
    for interaction in &backdrops {
        if *interaction == Interaction::Pressed {
            dismissed.write(OverlayDismissed);
        }
    }
}

pub fn close_button_interaction(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<OverlayCloseButton>),
    >,
    mut dismissed: EventWriter<OverlayDismissed>,
) {
    for (interaction, mut bg) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                dismissed.write(OverlayDismissed);
            }
            Interaction::Hovered => *bg = BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.16)),
            Interaction::None => *bg = BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.08)),
        }
    }
}

pub fn dismiss_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    open: Query<(), (With<OverlayRoot>, Without<OverlayClosing>)>,
    mut dismissed: EventWriter<OverlayDismissed>,
) {
    if keyboard.just_pressed(KeyCode::Escape) && !open.is_empty() {
        dismissed.write(OverlayDismissed);
    }
}

pub fn animate_backdrop_fade(
    time: Res<Time>,
    mut backdrops: Query<
        (Entity, &mut BackdropFade, &mut BackgroundColor),
        Without<OverlayClosing>,
    >,
    mut commands: Commands,
) {
    for (entity, mut fade, mut bg) in &mut backdrops {
        let t = ease_out_cubic(fade.0.tick(time.delta()).fraction());
        bg.0.set_alpha(BACKDROP_BG.alpha() * t);
        if fade.0.finished() {
            commands.entity(entity).remove::<BackdropFade>();
        }
    }
}

/// When the selection clears, freeze any mid-entrance reveal, capture every
/// node's current alphas and start the exit clock on the root.
pub fn start_overlay_exit(
    selection: Res<SelectedProject>,
    roots: Query<Entity, (With<OverlayRoot>, Without<OverlayClosing>)>,
    children_q: Query<&Children>,
    backgrounds: Query<&BackgroundColor>,
    borders: Query<&BorderColor>,
    texts: Query<&TextColor>,
    images: Query<&ImageNode>,
    mut commands: Commands,
) {
    if !selection.is_changed() || selection.0.is_some() {
        return;
    }

    for root in &roots {
        commands
            .entity(root)
            .insert(OverlayClosing(Timer::from_seconds(
                OVERLAY_EXIT_SECS,
                TimerMode::Once,
            )))
            .remove::<BackdropFade>();

        for entity in std::iter::once(root).chain(children_q.iter_descendants(root)) {
            commands
                .entity(entity)
                .insert(FadeOut {
                    bg: backgrounds.get(entity).ok().map(|c| c.0.alpha()),
                    border: borders.get(entity).ok().map(|c| c.0.alpha()),
                    text: texts.get(entity).ok().map(|c| c.0.alpha()),
                    image: images.get(entity).ok().map(|i| i.color.alpha()),
                })
                .remove::<FadeSlideIn>();
        }
    }
}

/// Uniform fade-out with a slight downward drift on the panel, then despawn.
pub fn animate_overlay_exit(
    time: Res<Time>,
    mut roots: Query<(Entity, &mut OverlayClosing)>,
    children_q: Query<&Children>,
    mut fading: Query<(
        &FadeOut,
        Option<&mut BackgroundColor>,
        Option<&mut BorderColor>,
        Option<&mut TextColor>,
        Option<&mut ImageNode>,
    )>,
    mut panels: Query<&mut Node, With<OverlayPanel>>,
    mut commands: Commands,
) {
    for (root, mut closing) in &mut roots {
        let t = closing.0.tick(time.delta()).fraction();

        for entity in std::iter::once(root).chain(children_q.iter_descendants(root)) {
            let Ok((fade, mut bg, mut border, mut text, mut image)) = fading.get_mut(entity)
            else {
                continue;
            };
            if let (Some(start), Some(bg)) = (fade.bg, bg.as_deref_mut()) {
                bg.0.set_alpha(start * (1.0 - t));
            }
            if let (Some(start), Some(border)) = (fade.border, border.as_deref_mut()) {
                border.0.set_alpha(start * (1.0 - t));
            }
            if let (Some(start), Some(text)) = (fade.text, text.as_deref_mut()) {
                text.0.set_alpha(start * (1.0 - t));
            }
            if let (Some(start), Some(image)) = (fade.image, image.as_deref_mut()) {
                image.color.set_alpha(start * (1.0 - t));
            }
        }

        for mut node in &mut panels {
            node.top = Val::Px(24.0 * t);
        }

        if closing.0.finished() {
            commands.entity(root).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BACKDROP_FADE_SECS;

    #[test]
    fn content_reveals_start_after_the_backdrop_and_stagger() {
        assert!(reveal_delay(0) >= BACKDROP_FADE_SECS);
        for index in 1..8 {
            let gap = reveal_delay(index) - reveal_delay(index - 1);
            assert!((gap - CONTENT_STAGGER_SECS).abs() < 1e-6);
        }
    }

    #[test]
    fn backdrop_press_dismisses_the_overlay() {
        let mut app = App::new();
        app.add_event::<OverlayDismissed>();
        app.add_systems(Update, backdrop_interaction);

        app.world_mut().spawn((Interaction::Pressed, OverlayBackdrop));
        app.update();

        let events = app.world().resource::<Events<OverlayDismissed>>();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn panel_press_never_reaches_the_backdrop() {
        let mut app = App::new();
        app.add_event::<OverlayDismissed>();
        app.add_systems(Update, backdrop_interaction);

        // The panel blocks focus, so a press inside it reaches only the
        // panel's own Interaction.
        app.world_mut().spawn((Interaction::Pressed, OverlayPanel));
        app.update();

        let events = app.world().resource::<Events<OverlayDismissed>>();
        assert!(events.is_empty());
    }

    #[test]
    fn escape_dismisses_only_while_an_overlay_is_open() {
        let mut app = App::new();
        app.add_event::<OverlayDismissed>();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.add_systems(Update, dismiss_on_escape);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        assert!(
            app.world()
                .resource::<Events<OverlayDismissed>>()
                .is_empty(),
            "no overlay, nothing to dismiss"
        );

        app.world_mut().spawn((OverlayRoot, Interaction::default()));
        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.release(KeyCode::Escape);
            keyboard.clear();
            keyboard.press(KeyCode::Escape);
        }
        app.update();
        assert_eq!(app.world().resource::<Events<OverlayDismissed>>().len(), 1);
    }
}
