//! Site tunables.
//!
//! Defaults are compiled in; an inline
//! `<script type="application/json" id="site-config">` block in the page may
//! override any subset of fields. It is read synchronously at startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 5 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Scroll offset past which the navbar gets `scrolled` and back-to-top shows.
    pub scroll_threshold: f64,
    /// Added to `scrollY` before matching it against section bounds.
    pub section_probe_offset: f64,
    /// Fixed navbar height subtracted from the smooth-scroll target.
    pub nav_offset: f64,
    pub desktop_breakpoint: f64,
    pub scroll_throttle_ms: u32,
    pub resize_debounce_ms: u32,
    pub notification_ms: u32,
    pub notification_fade_ms: u32,
    pub counter_duration_ms: u32,
    pub counter_tick_ms: u32,
    pub skill_stagger_ms: u32,
    pub ripple_ms: u32,
    pub parallax_factor: f64,
    pub typewriter: TypewriterConfig,
    pub github_user: Option<String>,
    pub max_upload_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypewriterConfig {
    pub phrases: Vec<String>,
    pub type_ms: u32,
    pub delete_ms: u32,
    pub hold_ms: u32,
    pub gap_ms: u32,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Lập trình viên Full-stack".to_owned(),
                "Người yêu công nghệ".to_owned(),
                "Kỹ sư phần mềm".to_owned(),
                "Người học suốt đời".to_owned(),
            ],
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            gap_ms: 500,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 100.0,
            section_probe_offset: 100.0,
            nav_offset: 70.0,
            desktop_breakpoint: 768.0,
            scroll_throttle_ms: 100,
            resize_debounce_ms: 250,
            notification_ms: 3000,
            notification_fade_ms: 300,
            counter_duration_ms: 2000,
            counter_tick_ms: 16,
            skill_stagger_ms: 200,
            ripple_ms: 600,
            parallax_factor: 0.5,
            typewriter: TypewriterConfig::default(),
            github_user: None,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: SiteConfig =
            serde_json::from_str(raw).context("invalid site config")?;
        Ok(config.normalized())
    }

    /// Contents of the inline config block, if the page has one. Absent or
    /// blank yields the defaults; malformed JSON is logged and ignored.
    pub fn from_inline(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "using default site config");
                Self::default()
            }
        }
    }

    /// Blank account names mean "no statistics".
    fn normalized(mut self) -> Self {
        self.github_user = self
            .github_user
            .map(|user| user.trim().to_owned())
            .filter(|user| !user.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() -> Result<()> {
        let config = SiteConfig::from_json(
            r#"{"nav_offset": 80, "github_user": "octocat", "typewriter": {"type_ms": 70}}"#,
        )?;
        assert_eq!(config.nav_offset, 80.0);
        assert_eq!(config.github_user.as_deref(), Some("octocat"));
        assert_eq!(config.typewriter.type_ms, 70);
        assert_eq!(config.typewriter.phrases.len(), 4);
        assert_eq!(config.scroll_threshold, 100.0);
        assert_eq!(config.max_upload_bytes, MAX_UPLOAD_BYTES);
        Ok(())
    }

    #[test]
    fn blank_github_user_is_dropped() -> Result<()> {
        let config = SiteConfig::from_json(r#"{"github_user": "  "}"#)?;
        assert!(config.github_user.is_none());
        Ok(())
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SiteConfig::from_json("{nav_offset:").is_err());
    }

    #[test]
    fn inline_block_falls_back_to_defaults() {
        assert_eq!(SiteConfig::from_inline(None), SiteConfig::default());
        assert_eq!(SiteConfig::from_inline(Some("  \n ")), SiteConfig::default());
        assert_eq!(SiteConfig::from_inline(Some("{nav_offset:")), SiteConfig::default());

        let config = SiteConfig::from_inline(Some("\n  {\"github_user\": \"octocat\"}\n"));
        assert_eq!(config.github_user.as_deref(), Some("octocat"));
        assert_eq!(config.nav_offset, 70.0);
    }
}
