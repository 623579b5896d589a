//! Client configuration.
//!
//! Every constant the page depends on (phrases, timings, DOM selectors,
//! endpoints, user-facing messages) lives here. Defaults match the shipped
//! page. A page can override any subset by defining a global before the
//! module loads:
//!
//! ```html
//! <script>
//!   window.PORTFOLIO_CONFIG = { typing: { phrases: ["Rustacean"] } };
//! </script>
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{js_err, PortfolioError, Result};

/// Name of the optional override global on `window`.
pub const CONFIG_GLOBAL: &str = "PORTFOLIO_CONFIG";

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioConfig {
    pub typing: TypingConfig,
    pub reveal: RevealConfig,
    pub selectors: Selectors,
    pub endpoints: Endpoints,
    pub messages: Messages,
    /// How long the upload confirmation stays visible.
    pub confirmation_ms: u64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            typing: TypingConfig::default(),
            reveal: RevealConfig::default(),
            selectors: Selectors::default(),
            endpoints: Endpoints::default(),
            messages: Messages::default(),
            confirmation_ms: 3000,
        }
    }
}

impl PortfolioConfig {
    /// Decode an override document on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `window.PORTFOLIO_CONFIG`, falling back to defaults when unset.
    pub fn from_window(window: &web_sys::Window) -> Result<Self> {
        let value = js_sys::Reflect::get(window, &CONFIG_GLOBAL.into())
            .map_err(|err| PortfolioError::Js(js_err(err)))?;
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }

        let json =
            js_sys::JSON::stringify(&value).map_err(|err| PortfolioError::Js(js_err(err)))?;
        Self::from_json(&String::from(json))
    }

    pub fn validate(&self) -> Result<()> {
        if self.typing.phrases.is_empty() {
            return Err(PortfolioError::NoPhrases);
        }
        if self
            .typing
            .typing_speed_ms
            .checked_add(self.typing.new_phrase_delay_ms)
            .is_none()
        {
            return Err(PortfolioError::InvalidValue(
                "typingSpeedMs + newPhraseDelayMs overflows".to_string(),
            ));
        }
        Ok(())
    }

    pub fn confirmation_duration(&self) -> Duration {
        Duration::from_millis(self.confirmation_ms)
    }
}

/// Typing animation phrases and cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    /// Delay between typed characters.
    pub typing_speed_ms: u64,
    /// Delay between erased characters.
    pub erasing_speed_ms: u64,
    /// Pause with the full phrase on screen before erasing starts.
    pub display_pause_ms: u64,
    /// Added to the typing speed before the next phrase starts.
    pub new_phrase_delay_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Web Developer".to_string(),
                "Web Designer".to_string(),
                "Frontend Developer".to_string(),
            ],
            typing_speed_ms: 100,
            erasing_speed_ms: 50,
            display_pause_ms: 2000,
            new_phrase_delay_ms: 1100,
        }
    }
}

impl TypingConfig {
    pub fn typing_speed(&self) -> Duration {
        Duration::from_millis(self.typing_speed_ms)
    }

    pub fn erasing_speed(&self) -> Duration {
        Duration::from_millis(self.erasing_speed_ms)
    }

    pub fn display_pause(&self) -> Duration {
        Duration::from_millis(self.display_pause_ms)
    }

    /// Gap between an emptied display and the first character of the next phrase.
    pub fn next_phrase_delay(&self) -> Duration {
        Duration::from_millis(self.typing_speed_ms)
            .saturating_add(Duration::from_millis(self.new_phrase_delay_ms))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RevealConfig {
    /// Delay before progress bars fill.
    pub progress_delay_ms: u64,
    /// Attribute holding a bar's target fill percentage.
    pub progress_attribute: String,
    /// Attribute holding a circle's percentage.
    pub circle_attribute: String,
    /// CSS custom property the circle stylesheet reads.
    pub circle_property: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            progress_delay_ms: 500,
            progress_attribute: "data-done".to_string(),
            circle_attribute: "data-percent".to_string(),
            circle_property: "--percent".to_string(),
        }
    }
}

impl RevealConfig {
    pub fn progress_delay(&self) -> Duration {
        Duration::from_millis(self.progress_delay_ms)
    }
}

/// CSS selectors for every element the client touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub typing_display: String,
    pub progress_bars: String,
    pub circles: String,
    pub resume_form: String,
    pub resume_input: String,
    pub upload_button: String,
    pub upload_message: String,
    pub contact_form: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_subject: String,
    pub contact_message: String,
    pub toggle_button: String,
    pub upload_panel: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            typing_display: ".typing-animation".to_string(),
            progress_bars: ".progress-done".to_string(),
            circles: ".circle".to_string(),
            resume_form: "#resume-form".to_string(),
            resume_input: "#resume-input".to_string(),
            upload_button: "#upload-button".to_string(),
            upload_message: "#upload-message".to_string(),
            contact_form: "#contact-form".to_string(),
            contact_name: "#name".to_string(),
            contact_email: "#email".to_string(),
            contact_subject: "#subject".to_string(),
            contact_message: "#message".to_string(),
            toggle_button: "#toggle-upload".to_string(),
            upload_panel: "#upload-section".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Endpoints {
    pub upload_resume: String,
    pub send_email: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            upload_resume: "/upload_resume".to_string(),
            send_email: "/send_email".to_string(),
        }
    }
}

/// Text shown to the user through `alert`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
    pub invalid_file: String,
    pub upload_failed: String,
    pub message_sent: String,
    pub message_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            invalid_file: "Please upload a valid PDF file.".to_string(),
            upload_failed: "Failed to upload resume. Please try again.".to_string(),
            message_sent: "Message sent successfully!".to_string(),
            message_failed: "Failed to send message. Please try again.".to_string(),
        }
    }
}
