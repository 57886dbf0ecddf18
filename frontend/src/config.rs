use log::Level;
use serde::Deserialize;
use web_sys::Document;

use crate::error::Result;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_ISLAND_ID: &str = "landing-config";

/// Observer sections are replaced whole; both fields are required when overridden.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObserverConfig {
    pub threshold: f64,
    pub root_margin: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub nav_scroll_threshold: f64,
    pub header_offset: f64,
    pub scroll_top_threshold: f64,
    pub counter_duration_ms: u32,
    pub counter_frame_ms: u32,
    pub toast_lifetime_ms: u32,
    pub toast_exit_ms: u32,
    pub pulse_ms: u32,
    pub parallax_rate: f64,
    pub hero_stagger_ms: u32,
    pub loader_fade_ms: u32,
    pub feature_list_stagger_ms: u32,
    pub reveal: ObserverConfig,
    pub counters: ObserverConfig,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            nav_scroll_threshold: 100.0,
            header_offset: 80.0,
            scroll_top_threshold: 500.0,
            counter_duration_ms: 2000,
            counter_frame_ms: 16,
            toast_lifetime_ms: 5000,
            toast_exit_ms: 300,
            pulse_ms: 600,
            parallax_rate: -0.5,
            hero_stagger_ms: 200,
            loader_fade_ms: 500,
            feature_list_stagger_ms: 50,
            reveal: ObserverConfig {
                threshold: 0.1,
                root_margin: "0px 0px -50px 0px".to_string(),
            },
            counters: ObserverConfig {
                threshold: 0.7,
                root_margin: "0px 0px -100px 0px".to_string(),
            },
        }
    }
}

impl LandingConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the config island if the page ships one. A malformed island is
    /// logged and the defaults are used instead.
    pub fn from_document(document: &Document) -> Self {
        let Some(island) = document.get_element_by_id(CONFIG_ISLAND_ID) else {
            return Self::default();
        };
        let raw = island.text_content().unwrap_or_default();
        if raw.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&raw) {
            Ok(config) => {
                log::debug!("Loaded landing config from #{}", CONFIG_ISLAND_ID);
                config
            }
            Err(e) => {
                log::warn!("Ignoring #{}: {}", CONFIG_ISLAND_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_constants() {
        let config = LandingConfig::default();
        assert_eq!(config.header_offset, 80.0);
        assert_eq!(config.counter_duration_ms / config.counter_frame_ms, 125);
        assert_eq!(config.toast_lifetime_ms + config.toast_exit_ms, 5300);
        assert_eq!(config.counters.threshold, 0.7);
        assert_eq!(config.reveal.root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = LandingConfig::from_json(
            r#"{ "header_offset": 64, "counters": { "threshold": 0.5, "root_margin": "0px" } }"#,
        )
        .unwrap();
        assert_eq!(config.header_offset, 64.0);
        assert_eq!(config.counters.threshold, 0.5);
        assert_eq!(config.reveal, LandingConfig::default().reveal);
        assert_eq!(config.nav_scroll_threshold, 100.0);
    }

    #[test]
    fn observer_sections_need_both_fields() {
        assert!(LandingConfig::from_json(r#"{ "reveal": { "threshold": 0.2 } }"#).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(LandingConfig::from_json("{ header_offset: }").is_err());
    }
}
