//! Classifier entry points.
//!
//! [`classify`] derives every output from a single [`DeviceInfo`] snapshot.
//! The narrower functions each take a fresh snapshot of their own, so two of
//! them called back to back may disagree if the environment changed between
//! calls; use [`classify`] when the values must line up.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capabilities::{DeviceInfo, Performance};
use crate::optimization::{OptimizationLevel, OptimizationSettings};
use crate::probe::EnvironmentProbe;

/// Everything the rendering layer needs, from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub device_info: DeviceInfo,
    pub reduce_motion: bool,
    pub level: OptimizationLevel,
    pub settings: OptimizationSettings,
    /// Root CSS class hooks for `level`, space separated.
    pub classes: String,
}

pub fn classify<P: EnvironmentProbe + ?Sized>(probe: &P) -> Classification {
    let device_info = DeviceInfo::detect(probe);
    let reduce_motion = reduces_motion(&device_info, probe.prefers_reduced_motion());
    let level = OptimizationLevel::for_device(&device_info);

    debug!(
        level = %level,
        performance = %device_info.performance,
        class = ?device_info.class(),
        reduce_motion,
        "Classified environment"
    );

    Classification {
        device_info,
        reduce_motion,
        level,
        settings: *level.settings(),
        classes: level.css_class().to_string(),
    }
}

pub fn get_device_info<P: EnvironmentProbe + ?Sized>(probe: &P) -> DeviceInfo {
    DeviceInfo::detect(probe)
}

/// Whether animations and effects should be cut back.
///
/// True on mobile, on low performance or low-end devices, and whenever the
/// user asked for reduced motion. Independent of [`optimization_level`]: a
/// fast phone reduces motion but still lands in `low`, not `very-low`.
pub fn should_reduce_motion<P: EnvironmentProbe + ?Sized>(probe: &P) -> bool {
    let info = DeviceInfo::detect(probe);
    reduces_motion(&info, probe.prefers_reduced_motion())
}

pub fn optimization_level<P: EnvironmentProbe + ?Sized>(probe: &P) -> OptimizationLevel {
    OptimizationLevel::for_device(&DeviceInfo::detect(probe))
}

pub fn optimization_settings<P: EnvironmentProbe + ?Sized>(probe: &P) -> OptimizationSettings {
    *optimization_level(probe).settings()
}

/// CSS class hooks for the current level (empty on capable devices).
pub fn optimized_classes<P: EnvironmentProbe + ?Sized>(probe: &P) -> String {
    optimization_level(probe).css_class().to_string()
}

fn reduces_motion(info: &DeviceInfo, prefers_reduced_motion: bool) -> bool {
    info.is_mobile
        || info.performance == Performance::Low
        || info.is_low_end_device
        || prefers_reduced_motion
}
