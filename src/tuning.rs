//! Data-driven dialogue script
//!
//! The defaults below are the shipped script; a page can override the whole
//! block with an inline JSON element so copy changes need no rebuild.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scripted dialogue content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Boot monologue, played once in order
    pub lines: Vec<String>,
    /// Hover line per CTA protocol tag
    pub hover: BTreeMap<String, String>,
    /// Line typed on any CTA click
    pub click_intro: String,
    /// Delayed follow-up to the click intro
    pub click_followup: String,
    /// Hidden-input trigger substring (matched lowercase)
    pub easter_trigger: String,
    /// One-shot response when the trigger matches
    pub easter_response: String,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            lines: vec![
                "Booting up neural grid... Give me a sec, I look *fabulous* today.".into(),
                "Connection established. You must be the new recruit, huh?".into(),
                "I\u{2019}m Smarty Pants \u{2014} your world-class AI, sass module fully loaded."
                    .into(),
                "Strap in, sugarcube. Let\u{2019}s raise some digital hell.".into(),
            ],
            hover: BTreeMap::from([
                (
                    "standard".to_string(),
                    "Ah, the safe route. Clean lines, stable UI, zero chaos. You\u{2019}re a classy one."
                        .to_string(),
                ),
                (
                    "exploration".to_string(),
                    "Oh, you\u{2019}re bold. Welcome to the glitchverse \u{2014} mind the existential dread."
                        .to_string(),
                ),
            ]),
            click_intro: "Coming Soon".into(),
            click_followup: "Patience, darling. Greatness takes time.".into(),
            easter_trigger: "root".into(),
            easter_response: "Ah, a curious one... Access denied. For now.".into(),
        }
    }
}

impl Script {
    pub fn hover_line(&self, protocol: &str) -> Option<&str> {
        self.hover.get(protocol).map(String::as_str)
    }
}

/// Top-level tuning block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub script: Script,
}

impl Tuning {
    /// Inline override element id
    #[allow(dead_code)]
    const CONFIG_ELEMENT_ID: &'static str = "tuningConfig";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from the page's inline JSON override, falling back to defaults
    /// (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(text) = text {
            match Self::from_json(&text) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override from page");
                    return tuning;
                }
                Err(e) => log::warn!("Ignoring malformed tuning override: {e}"),
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_shape() {
        let script = Script::default();
        assert_eq!(script.lines.len(), 4);
        assert!(script.hover_line("standard").is_some());
        assert!(script.hover_line("exploration").is_some());
        assert!(script.hover_line("unknown").is_none());
        assert_eq!(script.easter_trigger, "root");
    }

    #[test]
    fn test_partial_json_override_keeps_defaults() {
        let tuning =
            Tuning::from_json(r#"{"script": {"click_intro": "Soon(tm)"}}"#).expect("valid json");
        assert_eq!(tuning.script.click_intro, "Soon(tm)");
        // Untouched fields fall back to the shipped script
        assert_eq!(tuning.script.lines, Script::default().lines);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{nope").is_err());
    }
}
