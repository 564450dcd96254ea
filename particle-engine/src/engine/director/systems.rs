use bevy::prelude::*;

use super::phases::is_scrolled;
use super::scroll::ScrollState;
use super::theme::Theme;
use crate::engine::assets::background_config::BackgroundConfig;
use crate::engine::camera::CameraFraming;
use crate::engine::input::events::{ScrollChanged, ThemeChanged, ViewportResized};
use crate::engine::particles::dynamics::refresh_colors;
use crate::engine::particles::particle_set::ParticleSet;
use crate::engine::text::layout::TextLayout;
use crate::rpc::web_rpc::WebRpcInterface;

/// Latest scroll report wins within a frame.
pub fn apply_scroll_events(mut events: EventReader<ScrollChanged>, mut scroll: ResMut<ScrollState>) {
    if let Some(event) = events.read().last() {
        scroll.set(event.offset_px, event.viewport_height_px);
    }
}

/// Switch theme and recolour straight away, so a flip while the words are
/// scattered is visible before the next regular colour pass.
pub fn apply_theme_events(
    mut events: EventReader<ThemeChanged>,
    mut theme: ResMut<Theme>,
    scroll: Res<ScrollState>,
    set: Option<ResMut<ParticleSet>>,
) {
    let Some(ThemeChanged(next)) = events.read().last().copied() else {
        return;
    };
    if *theme == next {
        return;
    }
    info!("Theme changed to {}", next.as_str());
    *theme = next;

    if let Some(mut set) = set {
        refresh_colors(&mut set, scroll.phase().reassemble, next.text_color());
    }
}

/// Reframe the camera, keep relative scroll progress and re-lay out the
/// words for the new width tier.
pub fn apply_viewport_resize(
    mut events: EventReader<ViewportResized>,
    config: Option<Res<BackgroundConfig>>,
    mut scroll: ResMut<ScrollState>,
    mut framing: ResMut<CameraFraming>,
    layout: Option<ResMut<TextLayout>>,
    set: Option<ResMut<ParticleSet>>,
) {
    let Some(event) = events.read().last().copied() else {
        return;
    };
    if event.width <= 0.0 || event.height <= 0.0 {
        return;
    }

    scroll.resize(event.height);
    let anchor = config
        .map(|config| config.model_translation())
        .unwrap_or(framing.anchor);
    *framing = CameraFraming::for_viewport(event.width, event.height).with_anchor(anchor);

    if let (Some(mut layout), Some(mut set)) = (layout, set) {
        if layout.rescale_for_width(event.width) {
            layout.apply(&mut set);
            debug!("Text re-laid out at scale {}", layout.scale());
        }
    }
}

/// Tell the host how opaque its content should be and whether the page
/// counts as scrolled, whenever either changes.
pub fn notify_scroll_state(
    scroll: Res<ScrollState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut last_sent: Local<Option<(f32, bool)>>,
) {
    let progress = scroll.progress();
    let opacity = scroll.phase().content_opacity();
    let scrolled = is_scrolled(progress);

    let changed = match *last_sent {
        Some((last_opacity, last_scrolled)) => {
            (last_opacity - opacity).abs() > 1e-3 || last_scrolled != scrolled
        }
        None => true,
    };
    if !changed {
        return;
    }

    rpc_interface.send_notification(
        "scroll_state",
        serde_json::json!({
            "content_opacity": opacity,
            "scrolled": scrolled,
            "progress": progress,
        }),
    );
    *last_sent = Some((opacity, scrolled));
}
