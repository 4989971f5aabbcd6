//! Transient toast messages: `Visible` → `Hiding` → removed.

use crate::config::SiteConfig;
use folio_types::NotificationKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    Hiding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub text: String,
    pub kind: NotificationKind,
    pub phase: NotificationPhase,
}

impl Notification {
    pub fn dom_id(&self) -> String {
        format!("notification-{}", self.id)
    }

    pub fn class_name(&self) -> String {
        format!("notification notification-{}", self.kind.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    next_id: u64,
    active: Vec<Notification>,
    visible_ms: u32,
    fade_ms: u32,
}

impl NotificationCenter {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            next_id: 1,
            active: Vec::new(),
            visible_ms: config.notification_ms,
            fade_ms: config.notification_fade_ms,
        }
    }

    pub fn visible_ms(&self) -> u32 {
        self.visible_ms
    }

    pub fn fade_ms(&self) -> u32 {
        self.fade_ms
    }

    pub fn push(&mut self, text: impl Into<String>, kind: NotificationKind) -> Notification {
        let notification = Notification {
            id: self.next_id,
            text: text.into(),
            kind,
            phase: NotificationPhase::Visible,
        };
        self.next_id += 1;
        self.active.push(notification.clone());
        notification
    }

    /// Display delay elapsed. `false` if the message is gone or already hiding.
    pub fn begin_hide(&mut self, id: u64) -> bool {
        match self.active.iter_mut().find(|n| n.id == id) {
            Some(n) if n.phase == NotificationPhase::Visible => {
                n.phase = NotificationPhase::Hiding;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.active.len();
        self.active.retain(|n| n.id != id);
        self.active.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut center = NotificationCenter::new(&SiteConfig::default());
        let first = center.push("Đã lưu", NotificationKind::Success);
        let second = center.push("Lỗi", NotificationKind::Error);
        assert_ne!(first.id, second.id);
        assert_eq!(first.class_name(), "notification notification-success");

        assert!(center.begin_hide(first.id));
        assert!(!center.begin_hide(first.id));
        assert_eq!(center.active[0].phase, NotificationPhase::Hiding);

        assert!(center.remove(first.id));
        assert!(!center.remove(first.id));
        assert!(!center.begin_hide(first.id));
        assert_eq!(center.active.len(), 1);
    }

    #[test]
    fn visible_notification_can_be_withdrawn() {
        let mut center = NotificationCenter::new(&SiteConfig::default());
        let shown = center.push("Đã lưu", NotificationKind::Success);
        let dropped = center.push("Lỗi", NotificationKind::Error);

        assert!(center.remove(dropped.id));
        assert!(!center.begin_hide(dropped.id));
        assert_eq!(center.active, [shown]);
    }
}
