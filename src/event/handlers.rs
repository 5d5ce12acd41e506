use std::cell::RefCell;
use std::rc::Rc;

use crate::dressing::EPHEMERAL_DRESSING_NAME;
use crate::event::{DressingEvent, EditorEvent, EventHandler};
use crate::util::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A short-lived, user-visible message
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: f64,
}

/// Turns user-facing events into toasts that expire after a fixed lifetime.
///
/// Clones share the same queue, so one clone can be subscribed to the bus while
/// another is read by the UI. Expiry is checked against the time passed in, so
/// showing a toast never blocks anything.
#[derive(Clone)]
pub struct NotificationCenter {
    toasts: Rc<RefCell<Vec<Toast>>>,
    lifetime_secs: f64,
    clock: fn() -> f64,
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("toasts", &self.toasts.borrow().len())
            .field("lifetime_secs", &self.lifetime_secs)
            .finish()
    }
}

impl NotificationCenter {
    pub fn new(lifetime_secs: f64) -> Self {
        Self::with_clock(lifetime_secs, time::current_time_secs)
    }

    pub fn with_clock(lifetime_secs: f64, clock: fn() -> f64) -> Self {
        Self {
            toasts: Rc::new(RefCell::new(Vec::new())),
            lifetime_secs,
            clock,
        }
    }

    pub fn push(&self, message: impl Into<String>, level: ToastLevel) {
        self.toasts.borrow_mut().push(Toast {
            message: message.into(),
            level,
            created_at: (self.clock)(),
        });
    }

    /// Toasts still visible at `now`; expired ones are dropped
    pub fn active_at(&self, now: f64) -> Vec<Toast> {
        let mut toasts = self.toasts.borrow_mut();
        toasts.retain(|toast| now - toast.created_at < self.lifetime_secs);
        toasts.clone()
    }

    pub fn active(&self) -> Vec<Toast> {
        self.active_at((self.clock)())
    }

    /// Seconds until the oldest live toast expires
    pub fn next_expiry_in(&self) -> Option<f64> {
        let now = (self.clock)();
        self.toasts
            .borrow()
            .iter()
            .map(|toast| (toast.created_at + self.lifetime_secs - now).max(0.0))
            .reduce(f64::min)
    }
}

impl EventHandler for NotificationCenter {
    fn handle_event(&mut self, event: &EditorEvent) {
        match event {
            EditorEvent::Dressing(DressingEvent::Created { .. }) => {
                self.push("Dressing créé ✅", ToastLevel::Success);
            }
            EditorEvent::Dressing(DressingEvent::AddedToEphemeral { .. }) => {
                self.push(
                    format!("Ajouté à « {} » ✅", EPHEMERAL_DRESSING_NAME),
                    ToastLevel::Success,
                );
            }
            EditorEvent::Dressing(DressingEvent::Removed { .. }) => {
                self.push("Dressing supprimé ✅", ToastLevel::Success);
            }
            EditorEvent::ProjectSaved { .. } => {
                self.push("Tenue enregistrée ✅", ToastLevel::Success);
            }
            EditorEvent::StorageFailed { operation, .. } => {
                self.push(
                    format!("Échec de l'enregistrement ({operation}), réessayez"),
                    ToastLevel::Error,
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dressing::DressingId;

    fn fixed_clock() -> f64 {
        100.0
    }

    #[test]
    fn test_toasts_expire() {
        let mut center = NotificationCenter::with_clock(2.2, fixed_clock);
        center.handle_event(&EditorEvent::Dressing(DressingEvent::Removed {
            id: DressingId::Persisted("dr_x".to_owned()),
            name: "Fall".to_owned(),
        }));

        assert_eq!(center.active_at(101.0).len(), 1);
        assert_eq!(center.active_at(101.0)[0].message, "Dressing supprimé ✅");
        assert!((center.next_expiry_in().unwrap() - 2.2).abs() < 1e-9);
        assert!(center.active_at(102.3).is_empty());
        assert_eq!(center.next_expiry_in(), None);
    }

    #[test]
    fn test_clones_share_queue() {
        let mut subscribed = NotificationCenter::with_clock(2.2, fixed_clock);
        let reader = subscribed.clone();
        subscribed.handle_event(&EditorEvent::Dressing(DressingEvent::AddedToEphemeral { count: 2 }));

        let toasts = reader.active_at(100.5);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "Ajouté à « Vêtements du jour » ✅");
    }

    #[test]
    fn test_canvas_events_are_silent() {
        let mut center = NotificationCenter::with_clock(2.2, fixed_clock);
        center.handle_event(&EditorEvent::Canvas(crate::event::CanvasEvent::Reset));
        assert!(center.active_at(100.0).is_empty());
    }
}
