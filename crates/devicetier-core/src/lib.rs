//! devicetier core — device capability detection, optimization tiers, configuration.

pub mod capabilities;
pub mod classifier;
pub mod config;
pub mod error;
pub mod optimization;
pub mod probe;

pub use capabilities::{DeviceClass, DeviceInfo, Performance};
pub use classifier::{
    classify, get_device_info, optimization_level, optimization_settings, optimized_classes,
    should_reduce_motion, Classification,
};
pub use config::{CorsMode, DeviceTierConfig};
pub use error::{Error, Result};
pub use optimization::{tier_table, OptimizationLevel, OptimizationSettings, TierProfile};
pub use probe::{
    EffectiveConnectionType, EnvironmentProbe, EnvironmentSnapshot, RuntimeFeatures,
    TouchSignals, Viewport,
};
