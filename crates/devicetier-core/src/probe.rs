//! Environment signal sources.
//!
//! The classifier never reads platform globals itself. Everything it looks at
//! comes through an [`EnvironmentProbe`], so a browser bridge, an HTTP
//! client-hints adapter and a test fixture are interchangeable.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Viewport geometry at probe time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

/// Raw touch capability signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchSignals {
    /// The runtime exposes touch start events.
    pub touch_events: bool,
    /// Reported maximum simultaneous touch points, if exposed.
    pub max_touch_points: Option<u32>,
}

impl TouchSignals {
    /// Touch events, or at least one reported touch point.
    pub fn supported(&self) -> bool {
        self.touch_events || self.max_touch_points.is_some_and(|points| points > 0)
    }
}

/// Runtime feature checks used to spot very old environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeFeatures {
    pub animation_frame: bool,
    pub promises: bool,
}

impl RuntimeFeatures {
    pub const fn modern() -> Self {
        Self {
            animation_frame: true,
            promises: true,
        }
    }

    /// Missing either feature marks a legacy runtime.
    pub fn is_legacy(&self) -> bool {
        !self.animation_frame || !self.promises
    }
}

impl Default for RuntimeFeatures {
    fn default() -> Self {
        Self::modern()
    }
}

/// Network effective connection type (Network Information API `effectiveType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EffectiveConnectionType {
    Slow2g,
    TwoG,
    ThreeG,
    FourG,
    /// Any value the classifier has no rule for.
    Unknown,
}

impl EffectiveConnectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow2g => "slow-2g",
            Self::TwoG => "2g",
            Self::ThreeG => "3g",
            Self::FourG => "4g",
            Self::Unknown => "unknown",
        }
    }

    /// `slow-2g` and `2g`.
    pub fn is_very_slow(&self) -> bool {
        matches!(self, Self::Slow2g | Self::TwoG)
    }
}

impl fmt::Display for EffectiveConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectiveConnectionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "slow-2g" => Ok(Self::Slow2g),
            "2g" => Ok(Self::TwoG),
            "3g" => Ok(Self::ThreeG),
            "4g" => Ok(Self::FourG),
            other => Err(Error::InvalidHint(format!("effective type '{other}'"))),
        }
    }
}

impl From<String> for EffectiveConnectionType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(Self::Unknown)
    }
}

impl From<EffectiveConnectionType> for String {
    fn from(value: EffectiveConnectionType) -> Self {
        value.as_str().to_string()
    }
}

/// Source of the capability signals consumed by the classifier.
///
/// Every optional signal returns `None` when the environment does not expose
/// it; absence selects a fallback branch and is never an error.
pub trait EnvironmentProbe {
    fn viewport(&self) -> Viewport;

    fn touch(&self) -> TouchSignals;

    /// Primary input can hover (`(hover: hover)`).
    fn hover(&self) -> bool;

    /// Approximate device memory in GB.
    fn memory_hint(&self) -> Option<f64>;

    /// Logical core count.
    fn core_hint(&self) -> Option<u32>;

    fn network_hint(&self) -> Option<EffectiveConnectionType>;

    /// User asked for reduced motion (`prefers-reduced-motion: reduce`).
    fn prefers_reduced_motion(&self) -> bool;

    fn runtime_features(&self) -> RuntimeFeatures {
        RuntimeFeatures::modern()
    }
}

/// A plain record of every signal, as a browser bridge or test would capture it.
///
/// Field names follow the browser APIs they mirror. Any field left out of a
/// JSON document takes its default: a modern 1920x1080 non-touch desktop with
/// hover and no hardware hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentSnapshot {
    pub screen_width: u32,
    pub screen_height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_ratio: Option<f64>,
    pub touch_events: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_touch_points: Option<u32>,
    pub has_hover: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_memory: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_concurrency: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_type: Option<EffectiveConnectionType>,
    pub prefers_reduced_motion: bool,
    pub has_animation_frame: bool,
    pub has_promise: bool,
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self {
            screen_width: 1920,
            screen_height: 1080,
            pixel_ratio: None,
            touch_events: false,
            max_touch_points: None,
            has_hover: true,
            device_memory: None,
            hardware_concurrency: None,
            effective_type: None,
            prefers_reduced_motion: false,
            has_animation_frame: true,
            has_promise: true,
        }
    }
}

impl EnvironmentSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }
}

impl EnvironmentProbe for EnvironmentSnapshot {
    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.screen_width,
            height: self.screen_height,
            pixel_ratio: self.pixel_ratio.unwrap_or(1.0),
        }
    }

    fn touch(&self) -> TouchSignals {
        TouchSignals {
            touch_events: self.touch_events,
            max_touch_points: self.max_touch_points,
        }
    }

    fn hover(&self) -> bool {
        self.has_hover
    }

    fn memory_hint(&self) -> Option<f64> {
        self.device_memory
    }

    fn core_hint(&self) -> Option<u32> {
        self.hardware_concurrency
    }

    fn network_hint(&self) -> Option<EffectiveConnectionType> {
        self.effective_type
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.prefers_reduced_motion
    }

    fn runtime_features(&self) -> RuntimeFeatures {
        RuntimeFeatures {
            animation_frame: self.has_animation_frame,
            promises: self.has_promise,
        }
    }
}
