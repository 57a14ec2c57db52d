use bevy::prelude::*;

/// One-shot fade plus vertical slide for a UI node. On its first tick the
/// animation captures the node's authored alphas as the targets, holds the
/// node invisible through the delay, then eases in and removes itself.
#[derive(Component)]
pub struct FadeSlideIn {
    pub delay: Timer,
    pub timer: Timer,
    /// Signed start offset in pixels; negative slides down from above,
    /// positive slides up from below.
    pub rise: f32,
    /// The node's resting `top` inset, restored when the slide lands.
    pub base_top: f32,
    captured: Option<CapturedAlphas>,
}

impl FadeSlideIn {
    pub fn new(delay_secs: f32, duration_secs: f32, rise: f32, base_top: f32) -> Self {
        Self {
            delay: Timer::from_seconds(delay_secs, TimerMode::Once),
            timer: Timer::from_seconds(duration_secs, TimerMode::Once),
            rise,
            base_top,
            captured: None,
        }
    }

    /// Fade without any slide.
    pub fn fade(delay_secs: f32, duration_secs: f32) -> Self {
        Self::new(delay_secs, duration_secs, 0.0, 0.0)
    }
}

/// Authored alphas captured before the node is blanked out.
#[derive(Debug, Clone, Copy, Default)]
struct CapturedAlphas {
    bg: Option<f32>,
    border: Option<f32>,
    text: Option<f32>,
    image: Option<f32>,
}

pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

pub fn animate_fade_slide(
    time: Res<Time>,
    mut animated: Query<(
        Entity,
        &mut FadeSlideIn,
        &mut Node,
        Option<&mut BackgroundColor>,
        Option<&mut BorderColor>,
        Option<&mut TextColor>,
        Option<&mut ImageNode>,
    )>,
    mut commands: Commands,
) {
    for (entity, mut anim, mut node, mut bg, mut border, mut text, mut image) in &mut animated {
        let captured = *anim.captured.get_or_insert_with(|| CapturedAlphas {
            bg: bg.as_ref().map(|c| c.0.alpha()),
            border: border.as_ref().map(|c| c.0.alpha()),
            text: text.as_ref().map(|c| c.0.alpha()),
            image: image.as_ref().map(|i| i.color.alpha()),
        });

        let delta = time.delta();
        let t = if !anim.delay.tick(delta).finished() {
            0.0
        } else {
            ease_out_cubic(anim.timer.tick(delta).fraction())
        };

        node.top = Val::Px(anim.base_top + anim.rise * (1.0 - t));
        if let (Some(target), Some(bg)) = (captured.bg, bg.as_deref_mut()) {
            bg.0.set_alpha(target * t);
        }
        if let (Some(target), Some(border)) = (captured.border, border.as_deref_mut()) {
            border.0.set_alpha(target * t);
        }
        if let (Some(target), Some(text)) = (captured.text, text.as_deref_mut()) {
            text.0.set_alpha(target * t);
        }
        if let (Some(target), Some(image)) = (captured.image, image.as_deref_mut()) {
            image.color.set_alpha(target * t);
        }

        if anim.timer.finished() {
            node.top = Val::Px(anim.base_top);
            commands.entity(entity).remove::<FadeSlideIn>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_covers_the_unit_interval_monotonically() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < f32::EPSILON);
        let mut previous = 0.0;
        for step in 1..=20 {
            let value = ease_out_cubic(step as f32 / 20.0);
            assert!(value > previous);
            previous = value;
        }
    }

    #[test]
    fn ease_decelerates_toward_the_end() {
        let early = ease_out_cubic(0.25) - ease_out_cubic(0.0);
        let late = ease_out_cubic(1.0) - ease_out_cubic(0.75);
        assert!(early > late);
    }
}
