//! Top-level page controller.
//!
//! `Portfolio` owns every component's state plus the storage adapter. The
//! frontend holds exactly one instance and forwards browser events to it; the
//! values returned here are what the render step writes to the DOM.

use crate::config::SiteConfig;
use crate::device::{BatteryStatus, DeviceSignals, FeatureFlags};
use crate::edit::{EditController, SaveOutcome};
use crate::nav::{MenuEvent, NavController};
use crate::notify::{Notification, NotificationCenter};
use crate::reveal::RevealTracker;
use crate::scroll::{ScrollTracker, ScrollView, SectionBounds};
use crate::stats::PortfolioStats;
use crate::theme::{SystemScheme, ThemeController};
use crate::throttle::{Coalescer, TimerRequest};
use crate::upload::{DataUri, validate_image};
use folio_storage::{KeyValueStore, StorageAdapter};
use folio_types::{FieldName, NotificationKind, Theme, keys};
use tracing::{info, warn};

/// Browser-provided facts read once at startup.
#[derive(Debug, Clone)]
pub struct Environment {
    pub system_scheme: SystemScheme,
    pub local_hour: u32,
    pub device: DeviceSignals,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            system_scheme: SystemScheme::NoPreference,
            local_hour: 12,
            device: DeviceSignals::default(),
        }
    }
}

pub struct Portfolio<S> {
    config: SiteConfig,
    storage: StorageAdapter<S>,
    theme: ThemeController,
    nav: NavController,
    scroll: ScrollTracker,
    scroll_limiter: Coalescer<f64>,
    resize_limiter: Coalescer<f64>,
    sections: Vec<SectionBounds>,
    editor: EditController,
    reveal: RevealTracker,
    notifications: NotificationCenter,
    flags: FeatureFlags,
    profile_image: Option<DataUri>,
    stats: PortfolioStats,
}

impl<S: KeyValueStore> Portfolio<S> {
    pub fn load(config: SiteConfig, store: S, env: &Environment) -> Self {
        let storage = StorageAdapter::new(store);
        let theme = ThemeController::resolve(&storage, env.system_scheme, env.local_hour);
        let editor = EditController::load(&storage);
        let profile_image = storage.get(keys::PROFILE_IMAGE).and_then(|raw| {
            let parsed = DataUri::parse(&raw);
            if parsed.is_none() {
                warn!("ignoring malformed stored profile image");
            }
            parsed
        });
        let flags = FeatureFlags::evaluate(&env.device);
        info!(theme = %theme.theme(), ?flags, "portfolio state loaded");

        Self {
            nav: NavController::new(&config),
            scroll: ScrollTracker::new(&config),
            scroll_limiter: Coalescer::throttle(config.scroll_throttle_ms),
            resize_limiter: Coalescer::debounce(config.resize_debounce_ms),
            reveal: RevealTracker::new(&config),
            notifications: NotificationCenter::new(&config),
            sections: Vec::new(),
            stats: PortfolioStats::placeholder(),
            config,
            storage,
            theme,
            editor,
            flags,
            profile_image,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn nav(&self) -> &NavController {
        &self.nav
    }

    pub fn editor(&self) -> &EditController {
        &self.editor
    }

    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    pub fn reveal_mut(&mut self) -> &mut RevealTracker {
        &mut self.reveal
    }

    pub fn flags(&self) -> FeatureFlags {
        self.flags
    }

    pub fn profile_image(&self) -> Option<&DataUri> {
        self.profile_image.as_ref()
    }

    pub fn stats(&self) -> PortfolioStats {
        self.stats
    }

    pub fn set_stats(&mut self, stats: PortfolioStats) {
        self.stats = stats;
    }

    // ── Notifications ──

    pub fn notify(&mut self, text: impl Into<String>, kind: NotificationKind) -> Notification {
        self.notifications.push(text, kind)
    }

    pub fn notifications(&mut self) -> &mut NotificationCenter {
        &mut self.notifications
    }

    // ── Theme ──

    pub fn toggle_theme(&mut self) -> (Theme, Notification) {
        let theme = self.theme.toggle(&self.storage);
        let text = match theme {
            Theme::Dark => "Đã chuyển sang chế độ tối",
            Theme::Light => "Đã chuyển sang chế độ sáng",
        };
        (theme, self.notify(text, NotificationKind::Success))
    }

    pub fn on_system_scheme_change(&mut self, prefers_dark: bool) -> Option<Theme> {
        self.theme.on_system_change(&self.storage, prefers_dark)
    }

    // ── Scroll ──

    /// Replace the measured section layout (document order).
    pub fn set_sections(&mut self, sections: Vec<SectionBounds>) {
        self.sections = sections;
    }

    pub fn push_scroll(&mut self, scroll_y: f64) -> Option<TimerRequest> {
        self.scroll_limiter.push(scroll_y)
    }

    /// Throttle timer elapsed. `measure` supplies the section layout as it is
    /// now; it is only called when a sample is actually delivered.
    pub fn fire_scroll<F>(&mut self, ticket: u64, measure: F) -> Option<ScrollView>
    where
        F: FnOnce() -> Vec<SectionBounds>,
    {
        let scroll_y = self.scroll_limiter.fire(ticket)?;
        self.sections = measure();
        Some(self.sample_scroll(scroll_y))
    }

    /// Unthrottled sample, used for the initial render.
    pub fn sample_scroll(&mut self, scroll_y: f64) -> ScrollView {
        let view = self.scroll.sample(scroll_y, &self.sections);
        self.nav.on_scroll(&view);
        view
    }

    /// Hero background offset, or `None` when motion is turned down.
    pub fn parallax_offset(&self, scroll_y: f64) -> Option<f64> {
        self.flags
            .animations_enabled()
            .then(|| scroll_y * self.config.parallax_factor)
    }

    // ── Navigation ──

    pub fn menu_event(&mut self, event: MenuEvent) -> bool {
        self.nav.handle(event)
    }

    pub fn push_resize(&mut self, width: f64) -> Option<TimerRequest> {
        self.resize_limiter.push(width)
    }

    /// Returns whether the menu state changed.
    pub fn fire_resize(&mut self, ticket: u64) -> bool {
        match self.resize_limiter.fire(ticket) {
            Some(width) => self.nav.handle(MenuEvent::Resize { width }),
            None => false,
        }
    }

    pub fn click_nav_link(&mut self, section_id: &str) -> Option<f64> {
        let top = self
            .sections
            .iter()
            .find(|section| section.id == section_id)
            .map(|section| section.top);
        self.nav.on_link_click(section_id, top)
    }

    // ── Inline editing ──

    pub fn enable_editing(&mut self) -> Option<Notification> {
        if !self.editor.enable_editing() {
            return None;
        }
        Some(self.notify(
            "Chế độ chỉnh sửa đã bật. Nhấn Lưu để lưu thay đổi.",
            NotificationKind::Info,
        ))
    }

    pub fn set_draft(&mut self, field: FieldName, text: impl Into<String>) -> bool {
        self.editor.set_draft(field, text)
    }

    pub fn confirm_field(&self, field: FieldName) -> Option<FieldName> {
        self.editor.confirm_field(field)
    }

    pub fn revert_field(&mut self, field: FieldName) -> Option<String> {
        self.editor.revert_field(field).map(str::to_owned)
    }

    pub fn save_changes(&mut self) -> Option<(SaveOutcome, Notification)> {
        let outcome = self.editor.save_changes(&self.storage)?;
        let notification = if outcome.persisted {
            self.notify("Đã lưu thông tin thành công!", NotificationKind::Success)
        } else {
            self.notify(
                "Đã cập nhật nhưng không thể lưu vào trình duyệt",
                NotificationKind::Warning,
            )
        };
        Some((outcome, notification))
    }

    // ── Profile image ──

    /// Pre-read validation. On rejection the error notification is queued and
    /// returned; nothing else changes.
    pub fn check_upload(&mut self, mime: &str, size: u64) -> Result<(), Notification> {
        validate_image(mime, size, self.config.max_upload_bytes).map_err(|err| {
            warn!(error = %err, "profile image rejected");
            self.notify(err.user_message(), NotificationKind::Error)
        })
    }

    /// Store file contents that passed [`check_upload`](Self::check_upload).
    pub fn store_profile_image(
        &mut self,
        mime: &str,
        bytes: &[u8],
    ) -> Result<(DataUri, Notification), Notification> {
        if let Err(err) = validate_image(mime, bytes.len() as u64, self.config.max_upload_bytes) {
            return Err(self.notify(err.user_message(), NotificationKind::Error));
        }
        let uri = DataUri::encode(mime, bytes);
        let notification = match self.storage.set(keys::PROFILE_IMAGE, uri.as_str()) {
            Ok(()) => self.notify("Đã cập nhật ảnh đại diện!", NotificationKind::Success),
            Err(err) => {
                warn!(error = %err, "failed to persist profile image");
                self.notify(
                    "Ảnh đã được cập nhật nhưng không thể lưu vào trình duyệt",
                    NotificationKind::Warning,
                )
            }
        };
        self.profile_image = Some(uri.clone());
        Ok((uri, notification))
    }

    // ── Device ──

    pub fn update_battery(&mut self, battery: BatteryStatus) -> bool {
        self.flags.update_battery(battery)
    }
}


