use eframe::egui;

use crate::event::{NotificationCenter, ToastLevel};

const SUCCESS_FILL: egui::Color32 = egui::Color32::from_rgb(5, 150, 105);
const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(185, 28, 28);

/// Stack of live toasts at the bottom of the window
pub fn toasts(notifications: &NotificationCenter, ctx: &egui::Context) {
    let active = notifications.active();
    if active.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .order(egui::Order::Tooltip)
        .interactable(false)
        .show(ctx, |ui| {
            for toast in &active {
                let fill = match toast.level {
                    ToastLevel::Success => SUCCESS_FILL,
                    ToastLevel::Error => ERROR_FILL,
                };
                egui::Frame::none()
                    .fill(fill)
                    .rounding(4.0)
                    .inner_margin(egui::Margin::symmetric(16.0, 8.0))
                    .show(ui, |ui| {
                        ui.colored_label(egui::Color32::WHITE, &toast.message);
                    });
            }
        });

    // Repaint once more so the oldest toast disappears on time
    match notifications.next_expiry_in().map(std::time::Duration::try_from_secs_f64) {
        Some(Ok(remaining)) => ctx.request_repaint_after(remaining),
        Some(Err(err)) => log::warn!("Toast expiry not representable: {}", err),
        None => {}
    }
}
