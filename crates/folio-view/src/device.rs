//! Coarse device/connection signals → feature flags.
//!
//! Every signal is optional; an environment that doesn't expose one simply
//! skips the matching optimization.

use serde::Deserialize;

/// Battery level below which continuous decorative animation is paused.
pub const LOW_BATTERY_LEVEL: f64 = 0.2;

/// Subset of `navigator.connection` (Network Information API).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    #[serde(default)]
    pub effective_type: Option<String>,
    #[serde(default)]
    pub save_data: Option<bool>,
}

impl ConnectionInfo {
    pub fn is_slow(&self) -> bool {
        matches!(self.effective_type.as_deref(), Some("slow-2g" | "2g"))
            || self.save_data == Some(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryStatus {
    /// 0.0 ..= 1.0
    pub level: f64,
    pub charging: bool,
}

impl BatteryStatus {
    pub fn is_low(&self) -> bool {
        !self.charging && self.level < LOW_BATTERY_LEVEL
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceSignals {
    pub cores: Option<u32>,
    pub connection: Option<ConnectionInfo>,
    pub battery: Option<BatteryStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub reduced_motion: bool,
    pub hide_decorations: bool,
    pub power_saving: bool,
}

impl FeatureFlags {
    pub fn evaluate(signals: &DeviceSignals) -> Self {
        Self {
            reduced_motion: signals.cores.is_some_and(|cores| cores > 0 && cores <= 2),
            hide_decorations: signals.connection.as_ref().is_some_and(ConnectionInfo::is_slow),
            power_saving: signals.battery.as_ref().is_some_and(BatteryStatus::is_low),
        }
    }

    /// Battery `levelchange`/`chargingchange`. Returns `true` if the power
    /// saving flag flipped.
    pub fn update_battery(&mut self, battery: BatteryStatus) -> bool {
        let power_saving = battery.is_low();
        let changed = power_saving != self.power_saving;
        self.power_saving = power_saving;
        changed
    }

    /// Continuous decorative effects (parallax, typewriter) are allowed.
    pub fn animations_enabled(&self) -> bool {
        !self.reduced_motion && !self.power_saving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_signals_change_nothing() {
        assert_eq!(FeatureFlags::evaluate(&DeviceSignals::default()), FeatureFlags::default());
    }

    #[test]
    fn slow_connection_hides_decorations() -> Result<(), serde_json::Error> {
        let connection: ConnectionInfo = serde_json::from_str(r#"{"effectiveType":"2g"}"#)?;
        let flags = FeatureFlags::evaluate(&DeviceSignals {
            connection: Some(connection),
            ..DeviceSignals::default()
        });
        assert!(flags.hide_decorations);
        assert!(!flags.reduced_motion);

        let fast: ConnectionInfo = serde_json::from_str(r#"{"effectiveType":"4g"}"#)?;
        assert!(!fast.is_slow());
        Ok(())
    }

    #[test]
    fn low_core_count_reduces_motion() {
        let flags = FeatureFlags::evaluate(&DeviceSignals {
            cores: Some(2),
            ..DeviceSignals::default()
        });
        assert!(flags.reduced_motion);
        assert!(!flags.animations_enabled());
    }

    #[test]
    fn battery_events_toggle_power_saving() {
        let mut flags = FeatureFlags::evaluate(&DeviceSignals {
            battery: Some(BatteryStatus {
                level: 0.5,
                charging: false,
            }),
            ..DeviceSignals::default()
        });
        assert!(!flags.power_saving);

        assert!(flags.update_battery(BatteryStatus {
            level: 0.15,
            charging: false,
        }));
        assert!(flags.power_saving);

        assert!(flags.update_battery(BatteryStatus {
            level: 0.15,
            charging: true,
        }));
        assert!(!flags.power_saving);
        assert!(!flags.update_battery(BatteryStatus {
            level: 0.9,
            charging: true,
        }));
    }
}
