//! Environment probe backed by HTTP client hints.
//!
//! Browsers only send these headers after the server has listed them in
//! `Accept-CH`, so the first request from a client usually carries none and
//! classifies as a plain desktop. Core count has no client hint, so hardware
//! rating always takes the device-class fallback here.

use axum::http::HeaderMap;
use devicetier_core::{EffectiveConnectionType, EnvironmentProbe, TouchSignals, Viewport};
use tracing::debug;

/// Value for the `Accept-CH` response header: every hint this probe reads.
pub const ACCEPT_CH: &str = "Sec-CH-Viewport-Width, Sec-CH-Viewport-Height, Sec-CH-DPR, \
     Sec-CH-Device-Memory, Sec-CH-UA-Mobile, ECT, Sec-CH-Prefers-Reduced-Motion";

const MOBILE_VIEWPORT: (u32, u32) = (390, 844);
const DESKTOP_VIEWPORT: (u32, u32) = (1920, 1080);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientHintsProbe {
    viewport: Viewport,
    mobile: Option<bool>,
    device_memory: Option<f64>,
    effective_type: Option<EffectiveConnectionType>,
    prefers_reduced_motion: bool,
}

impl ClientHintsProbe {
    /// Read hints from request headers. Malformed values count as absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mobile = header_str(headers, &["sec-ch-ua-mobile"]).and_then(parse_sf_boolean);
        let (default_width, default_height) = if mobile == Some(true) {
            MOBILE_VIEWPORT
        } else {
            DESKTOP_VIEWPORT
        };

        let viewport = Viewport {
            width: header_number(headers, &["sec-ch-viewport-width", "viewport-width"])
                .unwrap_or(default_width),
            height: header_number(headers, &["sec-ch-viewport-height"]).unwrap_or(default_height),
            pixel_ratio: header_number(headers, &["sec-ch-dpr", "dpr"]).unwrap_or(1.0),
        };

        let device_memory = header_number(headers, &["sec-ch-device-memory", "device-memory"]);
        let effective_type = header_str(headers, &["ect"]).and_then(parse_effective_type);
        let prefers_reduced_motion = header_str(headers, &["sec-ch-prefers-reduced-motion"])
            .is_some_and(|v| v.trim().trim_matches('"').eq_ignore_ascii_case("reduce"));

        Self {
            viewport,
            mobile,
            device_memory,
            effective_type,
            prefers_reduced_motion,
        }
    }
}

impl EnvironmentProbe for ClientHintsProbe {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn touch(&self) -> TouchSignals {
        TouchSignals {
            touch_events: self.mobile == Some(true),
            max_touch_points: None,
        }
    }

    fn hover(&self) -> bool {
        self.mobile != Some(true)
    }

    fn memory_hint(&self) -> Option<f64> {
        self.device_memory
    }

    fn core_hint(&self) -> Option<u32> {
        None
    }

    fn network_hint(&self) -> Option<EffectiveConnectionType> {
        self.effective_type
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.prefers_reduced_motion
    }
}

/// First present, valid UTF-8 value among `names`.
fn header_str<'a>(headers: &'a HeaderMap, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| headers.get(*name).and_then(|v| v.to_str().ok()))
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, names: &[&str]) -> Option<T> {
    header_str(headers, names).and_then(|v| v.trim().parse().ok())
}

/// Unrecognized connection types are dropped, with the parse error logged.
fn parse_effective_type(value: &str) -> Option<EffectiveConnectionType> {
    match value.parse() {
        Ok(ect) => Some(ect),
        Err(e) => {
            debug!(error = %e, "Ignoring ECT client hint");
            None
        }
    }
}

/// Structured-field boolean: `?1` or `?0`.
fn parse_sf_boolean(value: &str) -> Option<bool> {
    match value.trim() {
        "?1" => Some(true),
        "?0" => Some(false),
        _ => None,
    }
}
