//! Optimization levels and the per-level rendering hints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::capabilities::{DeviceInfo, Performance};
use crate::error::{Error, Result};

/// How much visual richness the rendering layer should give up.
///
/// Ordered from most restrictive (`VeryLow`) to least (`High`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationLevel {
    VeryLow,
    Low,
    Medium,
    High,
}

impl OptimizationLevel {
    pub const ALL: [OptimizationLevel; 4] = [Self::VeryLow, Self::Low, Self::Medium, Self::High];

    /// Pick a level for a device. First matching rule wins:
    /// 1. low-end or low performance: `VeryLow`
    /// 2. mobile or medium performance: `Low`
    /// 3. tablet: `Medium`
    /// 4. otherwise: `High`
    pub fn for_device(info: &DeviceInfo) -> Self {
        if info.is_low_end_device || info.performance == Performance::Low {
            Self::VeryLow
        } else if info.is_mobile || info.performance == Performance::Medium {
            Self::Low
        } else if info.is_tablet {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very-low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Rendering hints for this level.
    pub fn settings(&self) -> &'static OptimizationSettings {
        match self {
            Self::VeryLow => &VERY_LOW,
            Self::Low => &LOW,
            Self::Medium => &MEDIUM,
            Self::High => &HIGH,
        }
    }

    /// Root CSS class for this level; empty for `High`.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::VeryLow => "very-low-end-optimized",
            Self::Low => "low-end-optimized",
            Self::Medium => "medium-performance-optimized",
            Self::High => "",
        }
    }
}

impl fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizationLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownLevel(s.to_string()))
    }
}

/// Fixed bundle of rendering hints for one optimization level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSettings {
    #[serde(rename = "reduce3DBackgroundQuality")]
    pub reduce_3d_background_quality: bool,
    pub simplify_animations: bool,
    pub reduce_blur_effects: bool,
    pub reduce_gradient_complexity: bool,
    pub reduce_shadow_intensity: bool,
    pub reduce_glass_effect: bool,
    /// Factor applied to every animation duration.
    pub animation_duration_multiplier: f64,
    pub reduce_image_quality: bool,
    pub simplify_layouts: bool,
    pub reduce_font_loading: bool,
    pub disable_backdrop_blur: bool,
    #[serde(rename = "disable3DBackgrounds")]
    pub disable_3d_backgrounds: bool,
    pub simplify_navigation: bool,
    pub reduce_padding: bool,
    pub smaller_fonts: bool,
}

const VERY_LOW: OptimizationSettings = OptimizationSettings {
    reduce_3d_background_quality: true,
    simplify_animations: true,
    reduce_blur_effects: true,
    reduce_gradient_complexity: true,
    reduce_shadow_intensity: true,
    reduce_glass_effect: true,
    animation_duration_multiplier: 2.0,
    reduce_image_quality: true,
    simplify_layouts: true,
    reduce_font_loading: true,
    disable_backdrop_blur: true,
    disable_3d_backgrounds: true,
    simplify_navigation: true,
    reduce_padding: true,
    smaller_fonts: true,
};

const LOW: OptimizationSettings = OptimizationSettings {
    reduce_3d_background_quality: true,
    simplify_animations: true,
    reduce_blur_effects: true,
    reduce_gradient_complexity: false,
    reduce_shadow_intensity: true,
    reduce_glass_effect: true,
    animation_duration_multiplier: 1.5,
    reduce_image_quality: false,
    simplify_layouts: true,
    reduce_font_loading: false,
    disable_backdrop_blur: true,
    disable_3d_backgrounds: false,
    simplify_navigation: true,
    reduce_padding: true,
    smaller_fonts: true,
};

const MEDIUM: OptimizationSettings = OptimizationSettings {
    reduce_3d_background_quality: true,
    simplify_animations: false,
    reduce_blur_effects: false,
    reduce_gradient_complexity: false,
    reduce_shadow_intensity: false,
    reduce_glass_effect: false,
    animation_duration_multiplier: 1.2,
    reduce_image_quality: false,
    simplify_layouts: false,
    reduce_font_loading: false,
    disable_backdrop_blur: false,
    disable_3d_backgrounds: false,
    simplify_navigation: false,
    reduce_padding: false,
    smaller_fonts: false,
};

const HIGH: OptimizationSettings = OptimizationSettings {
    reduce_3d_background_quality: false,
    simplify_animations: false,
    reduce_blur_effects: false,
    reduce_gradient_complexity: false,
    reduce_shadow_intensity: false,
    reduce_glass_effect: false,
    animation_duration_multiplier: 1.0,
    reduce_image_quality: false,
    simplify_layouts: false,
    reduce_font_loading: false,
    disable_backdrop_blur: false,
    disable_3d_backgrounds: false,
    simplify_navigation: false,
    reduce_padding: false,
    smaller_fonts: false,
};

/// One row of the level table, as published to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierProfile {
    pub level: OptimizationLevel,
    pub css_class: String,
    pub settings: OptimizationSettings,
}

impl From<OptimizationLevel> for TierProfile {
    fn from(level: OptimizationLevel) -> Self {
        Self {
            level,
            css_class: level.css_class().to_string(),
            settings: *level.settings(),
        }
    }
}

/// Every level with its settings, most restrictive first.
pub fn tier_table() -> Vec<TierProfile> {
    OptimizationLevel::ALL.into_iter().map(TierProfile::from).collect()
}
