//! Device capability detection and device-class classification.

use serde::{Deserialize, Serialize};

use crate::probe::{EffectiveConnectionType, EnvironmentProbe};

/// Widths at or below this are always mobile.
pub const MOBILE_MAX_WIDTH: u32 = 768;
/// Touch devices at or below this are mobile; non-touch ones are tablets.
pub const TABLET_MAX_WIDTH: u32 = 1024;
/// Touch devices at or below this (and not mobile) are tablets.
pub const TOUCH_TABLET_MAX_WIDTH: u32 = 1200;
/// Small-screen cutoff for the dense-display heuristic.
pub const SMALL_SCREEN_MAX_WIDTH: u32 = 480;
/// Pixel ratio above which a small screen is assumed to be an older device.
pub const DENSE_PIXEL_RATIO: f64 = 2.0;

/// Coarse performance estimate, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Performance {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Performance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Exactly one device class per environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    /// Classify by viewport width and touch support.
    ///
    /// Rules are tried in order, first match wins:
    /// - Mobile: width <= 768, or touch and width <= 1024
    /// - Tablet: width <= 1024, or touch and width <= 1200
    /// - Desktop: everything else, including touch screens wider than 1200
    pub fn from_viewport(width: u32, touch: bool) -> Self {
        if width <= MOBILE_MAX_WIDTH || (touch && width <= TABLET_MAX_WIDTH) {
            Self::Mobile
        } else if width <= TABLET_MAX_WIDTH || (touch && width <= TOUCH_TABLET_MAX_WIDTH) {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }
}

/// Snapshot of the device as seen by the classifier.
///
/// Recomputed on every call; nothing here is cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub is_desktop: bool,
    /// Set by any low-end signal: weak hardware, legacy runtime, or a 2g network.
    pub is_low_end_device: bool,
    pub performance: Performance,
    pub screen_width: u32,
    pub screen_height: u32,
    pub pixel_ratio: f64,
    pub touch_support: bool,
    pub has_hover: bool,
    /// Device memory in GB, when the environment exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<f64>,
    /// Logical core count, when the environment exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_cores: Option<u32>,
}

impl DeviceInfo {
    /// Read every signal from `probe` and derive the device snapshot.
    pub fn detect<P: EnvironmentProbe + ?Sized>(probe: &P) -> Self {
        let viewport = probe.viewport();
        let pixel_ratio = sanitize_pixel_ratio(viewport.pixel_ratio);
        let touch_support = probe.touch().supported();
        let has_hover = probe.hover();
        let class = DeviceClass::from_viewport(viewport.width, touch_support);

        // Zero and garbage readings mean the platform has nothing to report.
        let ram = probe.memory_hint().filter(|gb| gb.is_finite() && *gb > 0.0);
        let cpu_cores = probe.core_hint().filter(|cores| *cores > 0);

        let (mut performance, mut is_low_end_device) = match (ram, cpu_cores) {
            (Some(ram), Some(cores)) => Self::rate_hardware(ram, cores),
            _ => Self::rate_without_hints(class, viewport.width, pixel_ratio),
        };

        if probe.runtime_features().is_legacy() {
            performance = Performance::Low;
            is_low_end_device = true;
        }

        match probe.network_hint() {
            Some(ect) if ect.is_very_slow() => {
                performance = Performance::Low;
                is_low_end_device = true;
            }
            Some(EffectiveConnectionType::ThreeG) => {
                performance = performance.min(Performance::Medium);
            }
            _ => {}
        }

        Self {
            is_mobile: class == DeviceClass::Mobile,
            is_tablet: class == DeviceClass::Tablet,
            is_desktop: class == DeviceClass::Desktop,
            is_low_end_device,
            performance,
            screen_width: viewport.width,
            screen_height: viewport.height,
            pixel_ratio,
            touch_support,
            has_hover,
            ram,
            cpu_cores,
        }
    }

    /// The device class the three flags encode.
    pub fn class(&self) -> DeviceClass {
        if self.is_mobile {
            DeviceClass::Mobile
        } else if self.is_tablet {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }

    /// Rate from memory and core hints when both are known.
    fn rate_hardware(ram_gb: f64, cores: u32) -> (Performance, bool) {
        if ram_gb <= 2.0 || cores <= 2 {
            (Performance::Low, true)
        } else if ram_gb <= 4.0 || cores <= 4 {
            (Performance::Medium, false)
        } else {
            (Performance::High, false)
        }
    }

    /// Rate by device class when hardware hints are missing.
    fn rate_without_hints(class: DeviceClass, width: u32, pixel_ratio: f64) -> (Performance, bool) {
        match class {
            // Dense displays on small screens usually mean an older phone.
            DeviceClass::Mobile
                if width <= SMALL_SCREEN_MAX_WIDTH && pixel_ratio > DENSE_PIXEL_RATIO =>
            {
                (Performance::Low, true)
            }
            DeviceClass::Mobile | DeviceClass::Tablet => (Performance::Medium, false),
            DeviceClass::Desktop => (Performance::High, false),
        }
    }
}

fn sanitize_pixel_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::EnvironmentSnapshot;

    fn snapshot(width: u32, touch: bool) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            screen_width: width,
            screen_height: 800,
            touch_events: touch,
            has_hover: !touch,
            ..Default::default()
        }
    }

    #[test]
    fn test_device_class_thresholds() {
        assert_eq!(DeviceClass::from_viewport(320, false), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_viewport(768, false), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_viewport(769, false), DeviceClass::Tablet);
        assert_eq!(DeviceClass::from_viewport(1024, false), DeviceClass::Tablet);
        assert_eq!(DeviceClass::from_viewport(1025, false), DeviceClass::Desktop);

        assert_eq!(DeviceClass::from_viewport(769, true), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_viewport(1024, true), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_viewport(1025, true), DeviceClass::Tablet);
        assert_eq!(DeviceClass::from_viewport(1200, true), DeviceClass::Tablet);
        assert_eq!(DeviceClass::from_viewport(1201, true), DeviceClass::Desktop);
    }

    #[test]
    fn test_exactly_one_class_flag_over_width_sweep() {
        for touch in [false, true] {
            for width in 0..=2000 {
                let info = DeviceInfo::detect(&snapshot(width, touch));
                let flags = [info.is_mobile, info.is_tablet, info.is_desktop];
                assert_eq!(
                    flags.iter().filter(|f| **f).count(),
                    1,
                    "width={width} touch={touch} flags={flags:?}"
                );
                assert_eq!(info.class(), DeviceClass::from_viewport(width, touch));
            }
        }
    }

    #[test]
    fn test_narrow_viewports_are_mobile_regardless_of_touch() {
        for width in [0, 320, 480, 600, 768] {
            assert!(DeviceInfo::detect(&snapshot(width, false)).is_mobile);
            assert!(DeviceInfo::detect(&snapshot(width, true)).is_mobile);
        }
    }

    #[test]
    fn test_wide_non_touch_is_desktop() {
        for width in [1025, 1200, 1440, 3840] {
            let info = DeviceInfo::detect(&snapshot(width, false));
            assert!(info.is_desktop);
            assert!(!info.is_mobile);
            assert!(!info.is_tablet);
        }
    }

    #[test]
    fn test_hardware_hints_rating() {
        let rate = |ram: f64, cores: u32| {
            DeviceInfo::detect(&EnvironmentSnapshot {
                device_memory: Some(ram),
                hardware_concurrency: Some(cores),
                ..Default::default()
            })
        };

        let low = rate(2.0, 8);
        assert_eq!(low.performance, Performance::Low);
        assert!(low.is_low_end_device);

        let low = rate(8.0, 2);
        assert_eq!(low.performance, Performance::Low);
        assert!(low.is_low_end_device);

        let medium = rate(4.0, 8);
        assert_eq!(medium.performance, Performance::Medium);
        assert!(!medium.is_low_end_device);

        let high = rate(8.0, 8);
        assert_eq!(high.performance, Performance::High);
        assert!(!high.is_low_end_device);
        assert_eq!(high.ram, Some(8.0));
        assert_eq!(high.cpu_cores, Some(8));
    }

    #[test]
    fn test_single_hint_takes_fallback() {
        // Memory alone is not enough to rate hardware; a desktop stays high.
        let info = DeviceInfo::detect(&EnvironmentSnapshot {
            device_memory: Some(1.0),
            ..Default::default()
        });
        assert_eq!(info.performance, Performance::High);
        assert!(!info.is_low_end_device);
        assert_eq!(info.ram, Some(1.0));
        assert_eq!(info.cpu_cores, None);
    }

    #[test]
    fn test_zero_hints_are_absent() {
        let info = DeviceInfo::detect(&EnvironmentSnapshot {
            device_memory: Some(0.0),
            hardware_concurrency: Some(0),
            ..Default::default()
        });
        assert_eq!(info.ram, None);
        assert_eq!(info.cpu_cores, None);
        assert_eq!(info.performance, Performance::High);
    }

    #[test]
    fn test_fallback_by_class() {
        let phone = DeviceInfo::detect(&EnvironmentSnapshot {
            pixel_ratio: Some(2.0),
            ..snapshot(414, true)
        });
        assert_eq!(phone.performance, Performance::Medium);
        assert!(!phone.is_low_end_device);

        let tablet = DeviceInfo::detect(&snapshot(1100, true));
        assert!(tablet.is_tablet);
        assert_eq!(tablet.performance, Performance::Medium);

        let desktop = DeviceInfo::detect(&snapshot(1920, false));
        assert_eq!(desktop.performance, Performance::High);
    }

    #[test]
    fn test_small_dense_phone_is_low_end() {
        let info = DeviceInfo::detect(&EnvironmentSnapshot {
            screen_width: 375,
            screen_height: 812,
            pixel_ratio: Some(3.0),
            touch_events: true,
            has_hover: false,
            ..Default::default()
        });
        assert!(info.is_mobile);
        assert_eq!(info.performance, Performance::Low);
        assert!(info.is_low_end_device);
        assert_eq!(info.ram, None);
        assert_eq!(info.cpu_cores, None);
    }

    #[test]
    fn test_small_dense_screen_edges() {
        let phone = |width: u32, ratio: f64| {
            DeviceInfo::detect(&EnvironmentSnapshot {
                pixel_ratio: Some(ratio),
                ..snapshot(width, true)
            })
        };

        // Width cutoff is inclusive.
        let edge = phone(480, 2.5);
        assert!(edge.is_mobile);
        assert_eq!(edge.performance, Performance::Low);
        assert!(edge.is_low_end_device);

        let wider = phone(481, 3.0);
        assert!(wider.is_mobile);
        assert_eq!(wider.performance, Performance::Medium);
        assert!(!wider.is_low_end_device);

        // Ratio cutoff is exclusive.
        let not_dense = phone(480, 2.0);
        assert_eq!(not_dense.performance, Performance::Medium);
        assert!(!not_dense.is_low_end_device);
    }

    #[test]
    fn test_hardware_hints_win_over_dense_screen_heuristic() {
        let info = DeviceInfo::detect(&EnvironmentSnapshot {
            pixel_ratio: Some(3.0),
            device_memory: Some(8.0),
            hardware_concurrency: Some(8),
            ..snapshot(375, true)
        });
        assert!(info.is_mobile);
        assert_eq!(info.performance, Performance::High);
        assert!(!info.is_low_end_device);
        assert_eq!(
            crate::optimization::OptimizationLevel::for_device(&info),
            crate::optimization::OptimizationLevel::Low
        );
    }

    #[test]
    fn test_legacy_runtime_overrides_hardware() {
        for (animation_frame, promise) in [(false, true), (true, false), (false, false)] {
            let info = DeviceInfo::detect(&EnvironmentSnapshot {
                device_memory: Some(16.0),
                hardware_concurrency: Some(16),
                has_animation_frame: animation_frame,
                has_promise: promise,
                ..Default::default()
            });
            assert_eq!(info.performance, Performance::Low);
            assert!(info.is_low_end_device);
        }
    }

    #[test]
    fn test_slow_network_forces_low_end() {
        for ect in [EffectiveConnectionType::Slow2g, EffectiveConnectionType::TwoG] {
            let info = DeviceInfo::detect(&EnvironmentSnapshot {
                device_memory: Some(8.0),
                hardware_concurrency: Some(8),
                effective_type: Some(ect),
                ..Default::default()
            });
            assert_eq!(info.performance, Performance::Low);
            assert!(info.is_low_end_device);
        }
    }

    #[test]
    fn test_3g_caps_at_medium_without_upgrading() {
        let capped = DeviceInfo::detect(&EnvironmentSnapshot {
            device_memory: Some(8.0),
            hardware_concurrency: Some(8),
            effective_type: Some(EffectiveConnectionType::ThreeG),
            ..Default::default()
        });
        assert_eq!(capped.performance, Performance::Medium);
        assert!(!capped.is_low_end_device);

        let still_low = DeviceInfo::detect(&EnvironmentSnapshot {
            device_memory: Some(2.0),
            hardware_concurrency: Some(8),
            effective_type: Some(EffectiveConnectionType::ThreeG),
            ..Default::default()
        });
        assert_eq!(still_low.performance, Performance::Low);
        assert!(still_low.is_low_end_device);
    }

    #[test]
    fn test_fast_or_unknown_network_changes_nothing() {
        for ect in [EffectiveConnectionType::FourG, EffectiveConnectionType::Unknown] {
            let info = DeviceInfo::detect(&EnvironmentSnapshot {
                effective_type: Some(ect),
                ..Default::default()
            });
            assert_eq!(info.performance, Performance::High);
            assert!(!info.is_low_end_device);
        }
    }

    #[test]
    fn test_pixel_ratio_sanitized() {
        for ratio in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let info = DeviceInfo::detect(&EnvironmentSnapshot {
                pixel_ratio: Some(ratio),
                ..Default::default()
            });
            assert_eq!(info.pixel_ratio, 1.0);
        }
        let info = DeviceInfo::detect(&EnvironmentSnapshot {
            pixel_ratio: Some(2.625),
            ..Default::default()
        });
        assert_eq!(info.pixel_ratio, 2.625);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let probe = EnvironmentSnapshot {
            screen_width: 834,
            screen_height: 1194,
            pixel_ratio: Some(2.0),
            max_touch_points: Some(5),
            device_memory: Some(4.0),
            hardware_concurrency: Some(6),
            ..Default::default()
        };
        assert_eq!(DeviceInfo::detect(&probe), DeviceInfo::detect(&probe));
    }

    #[test]
    fn test_serialized_field_names() {
        let info = DeviceInfo::detect(&EnvironmentSnapshot {
            device_memory: Some(8.0),
            hardware_concurrency: Some(8),
            ..Default::default()
        });
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["isDesktop"], true);
        assert_eq!(json["isLowEndDevice"], false);
        assert_eq!(json["performance"], "high");
        assert_eq!(json["screenWidth"], 1920);
        assert_eq!(json["cpuCores"], 8);

        let no_hints = serde_json::to_value(DeviceInfo::detect(&EnvironmentSnapshot::default()))
            .unwrap();
        assert!(no_hints.get("ram").is_none());
        assert!(no_hints.get("cpuCores").is_none());
    }
}
