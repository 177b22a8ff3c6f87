//! Page tunables.
//!
//! Every threshold and timing the effects use lives here. The page may
//! override any subset through a JSON script element; unspecified fields keep
//! their defaults.

use serde::Deserialize;

use crate::error::{SiteError, SiteResult};

/// Id of the optional `<script type="application/json">` holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-fx-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub back_to_top_after: f64,
    pub header_scrolled_after: f64,
    pub section_offset: f64,
    pub parallax_base: f64,
    pub parallax_step: f64,
    pub reveal_threshold: f64,
    pub carousel_track: String,
    pub carousel_interval_ms: u32,
    pub carousel_gap: f64,
    pub magnet_strength: f64,
    pub anchor_offset: f64,
    pub submit_delay_ms: u32,
    pub busy_label: String,
    pub completion_notice: String,
    pub menu_stagger_base: f64,
    pub menu_stagger_step: f64,
    pub particle_cap: usize,
    pub particle_rgb: [u8; 3],
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            back_to_top_after: 500.0,
            header_scrolled_after: 30.0,
            section_offset: 200.0,
            parallax_base: 0.1,
            parallax_step: 0.05,
            reveal_threshold: 0.15,
            carousel_track: "gallery-track".to_owned(),
            carousel_interval_ms: 4000,
            carousel_gap: 24.0,
            magnet_strength: 0.4,
            anchor_offset: 80.0,
            submit_delay_ms: 1500,
            busy_label: "TRANSMITTING...".to_owned(),
            completion_notice: "DATA ENCRYPTED & SYNCED. WELCOME TO THE ELITE.".to_owned(),
            menu_stagger_base: 0.1,
            menu_stagger_step: 0.08,
            particle_cap: 15,
            particle_rgb: [255, 0, 64],
        }
    }
}

impl SiteConfig {
    /// Parse overrides and validate the merged result.
    pub fn from_json(text: &str) -> SiteResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SiteResult<()> {
        if self.carousel_interval_ms == 0 {
            return Err(SiteError::config("carousel_interval_ms must be positive"));
        }
        if self.submit_delay_ms == 0 {
            return Err(SiteError::config("submit_delay_ms must be positive"));
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(SiteError::config(format!(
                "reveal_threshold {} outside [0, 1]",
                self.reveal_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.magnet_strength) {
            return Err(SiteError::config(format!(
                "magnet_strength {} outside [0, 1]",
                self.magnet_strength
            )));
        }
        Ok(())
    }
}
