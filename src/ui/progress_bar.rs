//! Thin progress strip drawn along the top edge of the window.

use busybar::LoadingSnapshot;
use eframe::egui;

/// Height of the strip in points.
pub const BAR_HEIGHT: f32 = 3.0;

/// Renders the strip.
///
/// It stays opaque while loading and fades out over `fade_secs` once the bar sits
/// at 100% waiting for the reset.
pub fn render_progress_bar(ui: &mut egui::Ui, snapshot: &LoadingSnapshot, fade_secs: f32) {
    let opacity = ui.ctx().animate_bool_with_time(
        egui::Id::new("busybar_progress"),
        snapshot.is_loading,
        fade_secs,
    );

    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), BAR_HEIGHT),
        egui::Sense::hover(),
    );
    if opacity <= 0.0 {
        return;
    }

    let fill = ui.visuals().selection.bg_fill.gamma_multiply(opacity);
    let filled = egui::Rect::from_min_size(
        rect.min,
        egui::vec2(rect.width() * snapshot.fraction(), rect.height()),
    );
    ui.painter().rect_filled(filled, 0.0, fill);
}
