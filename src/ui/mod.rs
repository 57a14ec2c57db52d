pub mod animate;
pub mod chrome;
pub mod loading;
pub mod overlay;

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::catalog::ProjectId;

/// Nullable selection owned by the shell. `Some` means the detail overlay
/// is up for that project; cleared the instant the overlay is dismissed.
#[derive(Resource, Default)]
pub struct SelectedProject(pub Option<ProjectId>);

/// Fired by the picking system when an exhibit is clicked.
#[derive(Event)]
pub struct ProjectSelected(pub ProjectId);

/// Fired by any of the overlay's dismissal paths: backdrop press, close
/// control, Escape.
#[derive(Event)]
pub struct OverlayDismissed;

/// True while the pointer belongs to the UI layer; the orbit control and the
/// exhibit picking both stand down.
#[derive(Resource, Default)]
pub struct PointerCapture(pub bool);

pub fn apply_selection_events(
    mut events: EventReader<ProjectSelected>,
    mut selection: ResMut<SelectedProject>,
) {
    for ProjectSelected(id) in events.read() {
        if selection.0.is_none() {
            selection.0 = Some(*id);
            info!("Project selected: {}", id.0);
        }
    }
}

pub fn apply_dismiss_events(
    mut events: EventReader<OverlayDismissed>,
    mut selection: ResMut<SelectedProject>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();
    if selection.0.take().is_some() {
        info!("Overlay dismissed");
    }
}

pub fn update_pointer_capture(
    selection: Res<SelectedProject>,
    interactions: Query<&Interaction>,
    mut capture: ResMut<PointerCapture>,
) {
    capture.0 =
        selection.0.is_some() || interactions.iter().any(|i| *i != Interaction::None);
}

pub struct GalleryUiPlugin;

impl Plugin for GalleryUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedProject>()
            .init_resource::<PointerCapture>()
            .add_event::<ProjectSelected>()
            .add_event::<OverlayDismissed>()
            .add_systems(Startup, loading::spawn_loading_screen)
            .add_systems(
                Update,
                loading::animate_loading_spinner.run_if(in_state(AppState::Loading)),
            )
            .add_systems(
                OnEnter(AppState::Running),
                (loading::despawn_loading_screen, chrome::spawn_chrome),
            )
            .add_systems(
                Update,
                // Selection flows through in order: click events first, then
                // dismissals, then the overlay reacts to the final value.
                (
                    apply_selection_events,
                    apply_dismiss_events,
                    overlay::spawn_overlay_on_selection,
                    overlay::start_overlay_exit,
                )
                    .chain()
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(
                Update,
                (
                    update_pointer_capture,
                    animate::animate_fade_slide,
                    chrome::social_button_interaction,
                    overlay::backdrop_interaction,
                    overlay::close_button_interaction,
                    overlay::dismiss_on_escape,
                    overlay::animate_backdrop_fade,
                    overlay::animate_overlay_exit,
                )
                    .run_if(in_state(AppState::Running)),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_app() -> App {
        let mut app = App::new();
        app.init_resource::<SelectedProject>();
        app.add_event::<ProjectSelected>();
        app.add_event::<OverlayDismissed>();
        app.add_systems(Update, (apply_selection_events, apply_dismiss_events).chain());
        app
    }

    #[test]
    fn selection_starts_null_then_tracks_click_and_close() {
        let mut app = shell_app();
        assert_eq!(app.world().resource::<SelectedProject>().0, None);

        app.world_mut().send_event(ProjectSelected(ProjectId(3)));
        app.update();
        assert_eq!(
            app.world().resource::<SelectedProject>().0,
            Some(ProjectId(3))
        );

        app.world_mut().send_event(OverlayDismissed);
        app.update();
        assert_eq!(app.world().resource::<SelectedProject>().0, None);
    }

    #[test]
    fn clicks_behind_an_open_overlay_do_not_replace_the_selection() {
        let mut app = shell_app();
        app.world_mut().send_event(ProjectSelected(ProjectId(1)));
        app.update();
        app.world_mut().send_event(ProjectSelected(ProjectId(2)));
        app.update();
        assert_eq!(
            app.world().resource::<SelectedProject>().0,
            Some(ProjectId(1))
        );
    }

    #[test]
    fn dismiss_without_a_selection_is_a_no_op() {
        let mut app = shell_app();
        app.world_mut().send_event(OverlayDismissed);
        app.update();
        assert_eq!(app.world().resource::<SelectedProject>().0, None);
    }

    #[test]
    fn pointer_capture_tracks_selection_and_ui_hover() {
        let mut app = App::new();
        app.init_resource::<SelectedProject>();
        app.init_resource::<PointerCapture>();
        app.add_systems(Update, update_pointer_capture);

        app.update();
        assert!(!app.world().resource::<PointerCapture>().0);

        app.world_mut().spawn(Interaction::Hovered);
        app.update();
        assert!(app.world().resource::<PointerCapture>().0);

        app.world_mut().clear_entities();
        app.world_mut().resource_mut::<SelectedProject>().0 = Some(ProjectId(1));
        app.update();
        assert!(app.world().resource::<PointerCapture>().0);
    }
}
