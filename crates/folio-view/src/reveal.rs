//! One-shot scroll reveal.
//!
//! Each watched element fires its effect the first time it intersects the
//! viewport and is then marked triggered; later intersections do nothing.

use crate::config::SiteConfig;
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealGroup {
    Fade,
    SkillBar,
    Counter,
    Typewriter,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

impl RevealGroup {
    pub const ALL: [RevealGroup; 4] = [
        RevealGroup::Fade,
        RevealGroup::SkillBar,
        RevealGroup::Counter,
        RevealGroup::Typewriter,
    ];

    pub fn selector(self) -> &'static str {
        match self {
            RevealGroup::Fade => ".animate-on-scroll",
            RevealGroup::SkillBar => ".skill-progress",
            RevealGroup::Counter => ".counter",
            RevealGroup::Typewriter => ".typewriter",
        }
    }

    pub fn observer_options(self) -> ObserverOptions {
        match self {
            RevealGroup::Fade => ObserverOptions {
                threshold: 0.1,
                root_margin: "0px 0px -50px 0px",
            },
            RevealGroup::SkillBar => ObserverOptions {
                threshold: 0.5,
                root_margin: "0px",
            },
            RevealGroup::Counter => ObserverOptions {
                threshold: 0.5,
                root_margin: "0px",
            },
            RevealGroup::Typewriter => ObserverOptions {
                threshold: 0.1,
                root_margin: "0px",
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum WatchSpec {
    Fade,
    SkillBar { percent: u8, index: usize },
    Counter { target: u64 },
    Typewriter,
}

impl WatchSpec {
    pub fn group(&self) -> RevealGroup {
        match self {
            WatchSpec::Fade => RevealGroup::Fade,
            WatchSpec::SkillBar { .. } => RevealGroup::SkillBar,
            WatchSpec::Counter { .. } => RevealGroup::Counter,
            WatchSpec::Typewriter => RevealGroup::Typewriter,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RevealEffect {
    FadeIn,
    FillSkill { percent: u8, delay_ms: u32 },
    Count { target: u64 },
    StartTypewriter,
}

/// Parse `data-progress`/`data-width` values such as `"85"` or `"85%"`,
/// clamped to 100.
pub fn parse_percent(raw: &str) -> Option<u8> {
    let value: f64 = raw.trim().trim_end_matches('%').trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.clamp(0.0, 100.0).round() as u8)
}

#[derive(Debug, Default)]
pub struct RevealTracker {
    watched: HashMap<String, WatchSpec>,
    triggered: HashSet<String>,
    skill_stagger_ms: u32,
}

impl RevealTracker {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            skill_stagger_ms: config.skill_stagger_ms,
            ..Self::default()
        }
    }

    /// Returns `false` if the element already fired (it stays unwatched).
    pub fn watch(&mut self, id: impl Into<String>, spec: WatchSpec) -> bool {
        let id = id.into();
        if self.triggered.contains(&id) {
            return false;
        }
        self.watched.insert(id, spec);
        true
    }

    pub fn is_triggered(&self, id: &str) -> bool {
        self.triggered.contains(id)
    }

    /// Intersection callback. Yields the effect on the first intersection
    /// only; the element is unwatched from then on.
    pub fn on_intersect(&mut self, id: &str, is_intersecting: bool) -> Option<RevealEffect> {
        if !is_intersecting {
            return None;
        }
        let spec = self.watched.remove(id)?;
        self.triggered.insert(id.to_owned());
        debug!(id, group = ?spec.group(), "reveal triggered");
        Some(match spec {
            WatchSpec::Fade => RevealEffect::FadeIn,
            WatchSpec::SkillBar { percent, index } => RevealEffect::FillSkill {
                percent,
                delay_ms: self.skill_stagger_ms.saturating_mul(index as u32),
            },
            WatchSpec::Counter { target } => RevealEffect::Count { target },
            WatchSpec::Typewriter => RevealEffect::StartTypewriter,
        })
    }
}

/// Count-up from 0 to `target` over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterAnimation {
    pub target: u64,
    pub duration_ms: u32,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: u32) -> Self {
        Self {
            target,
            duration_ms,
        }
    }

    /// Displayed value after `elapsed_ms`, floored; exactly `target` once the
    /// duration has passed.
    pub fn value_at(&self, elapsed_ms: u32) -> u64 {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return self.target;
        }
        (self.target as u128 * elapsed_ms as u128 / self.duration_ms as u128) as u64
    }

    pub fn is_done(&self, elapsed_ms: u32) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_intersection_is_noop() {
        let mut tracker = RevealTracker::new(&SiteConfig::default());
        tracker.watch("about-card", WatchSpec::Fade);

        assert_eq!(tracker.on_intersect("about-card", true), Some(RevealEffect::FadeIn));
        assert_eq!(tracker.on_intersect("about-card", true), None);
        assert!(tracker.is_triggered("about-card"));
        assert!(!tracker.watched.contains_key("about-card"));
        assert!(!tracker.watch("about-card", WatchSpec::Fade));
    }

    #[test]
    fn leaving_viewport_does_not_consume_trigger() {
        let mut tracker = RevealTracker::new(&SiteConfig::default());
        tracker.watch("stat-1", WatchSpec::Counter { target: 42 });
        assert_eq!(tracker.on_intersect("stat-1", false), None);
        assert_eq!(
            tracker.on_intersect("stat-1", true),
            Some(RevealEffect::Count { target: 42 })
        );
    }

    #[test]
    fn skill_bars_are_staggered_by_index() {
        let mut tracker = RevealTracker::new(&SiteConfig::default());
        tracker.watch("skill-2", WatchSpec::SkillBar { percent: 85, index: 2 });
        assert_eq!(
            tracker.on_intersect("skill-2", true),
            Some(RevealEffect::FillSkill {
                percent: 85,
                delay_ms: 400
            })
        );
    }

    #[test]
    fn unknown_element_is_ignored() {
        let mut tracker = RevealTracker::new(&SiteConfig::default());
        assert_eq!(tracker.on_intersect("ghost", true), None);
        assert!(!tracker.is_triggered("ghost"));
    }

    #[test]
    fn percent_parsing() {
        assert_eq!(parse_percent("85%"), Some(85));
        assert_eq!(parse_percent(" 90 "), Some(90));
        assert_eq!(parse_percent("140"), Some(100));
        assert_eq!(parse_percent("abc"), None);
    }

    #[test]
    fn counter_floors_and_lands_on_target() {
        let counter = CounterAnimation::new(7, 2000);
        assert_eq!(counter.value_at(0), 0);
        assert_eq!(counter.value_at(999), 3);
        assert_eq!(counter.value_at(1999), 6);
        assert_eq!(counter.value_at(2000), 7);
        assert_eq!(counter.value_at(5000), 7);
        assert!(counter.is_done(2000));
    }
}
