//! Game settings
//!
//! Read once at startup from the page's query string (web) or from
//! `key=value` command-line arguments (native). Nothing is persisted.

use crate::consts::ECHO_FADE_MS;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Fixed placement seed; clock-seeded when absent
    pub seed: Option<u64>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    // === Visual ===
    /// Lifetime of an on-screen echo
    pub echo_fade_ms: u32,
    /// Reduced motion (no pulsing markers)
    pub reduced_motion: bool,

    // === Terminal ===
    /// Print a JSON snapshot after every command (native driver)
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            master_volume: 0.8,
            muted: false,
            echo_fade_ms: ECHO_FADE_MS,
            reduced_motion: false,
            json: false,
        }
    }
}

impl Settings {
    /// Parse `key=value` pairs separated by `&`, with or without a leading `?`.
    ///
    /// Unknown keys are skipped; malformed values keep their default.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            settings.apply(key.trim(), value.trim());
        }
        settings
    }

    /// Apply a single setting by key
    pub fn apply(&mut self, key: &str, value: &str) {
        match key {
            "seed" => match value.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Invalid seed {value:?}, using clock seed"),
            },
            "volume" => match value.parse::<f32>() {
                Ok(vol) if vol.is_finite() => self.master_volume = vol.clamp(0.0, 1.0),
                _ => log::warn!("Invalid volume {value:?}, keeping {}", self.master_volume),
            },
            "muted" | "mute" => match parse_flag(value) {
                Some(flag) => self.muted = flag,
                None => log::warn!("Invalid flag {key}={value:?}"),
            },
            "fade" => match value.parse() {
                Ok(ms) => self.echo_fade_ms = ms,
                Err(_) => log::warn!("Invalid fade {value:?}, keeping {}ms", self.echo_fade_ms),
            },
            "reduced_motion" => match parse_flag(value) {
                Some(flag) => self.reduced_motion = flag,
                None => log::warn!("Invalid flag {key}={value:?}"),
            },
            "json" => match parse_flag(value) {
                Some(flag) => self.json = flag,
                None => log::warn!("Invalid flag {key}={value:?}"),
            },
            _ => log::debug!("Unknown setting {key:?} ignored"),
        }
    }

    /// Volume actually sent to the audio layer
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Load settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let query = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let settings = Self::from_query(&query);
        log::info!("Settings: {settings:?}");
        settings
    }

    /// Load settings from command-line arguments
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let settings = Self::from_query(&args.join("&"));
        log::info!("Settings: {settings:?}");
        settings
    }
}

/// Bare key (`muted`) counts as true
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
