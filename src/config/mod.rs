#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_selector,
    Validate,
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Everything the page script needs to know about the page it runs on.
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub storage: StorageConfig,
    pub selectors: SelectorConfig,
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub carousel: CarouselConfig,
    pub contact: ContactConfig,
    pub capabilities: Capabilities,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub theme_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            theme_key: "agni-theme".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectorConfig {
    pub nav_links: String,
    pub nav: String,
    pub nav_toggle: String,
    pub theme_toggle: String,
    pub reveal: String,
    pub counter: String,
    pub testimonial: String,
    pub testimonial_next: String,
    pub testimonial_prev: String,
    pub filter_button: String,
    pub portfolio_item: String,
    pub faq_item: String,
    pub faq_question: String,
    pub contact_form: String,
    pub form_status: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            nav_links: ".site-nav a[data-nav]".to_string(),
            nav: ".site-nav".to_string(),
            nav_toggle: ".nav-toggle".to_string(),
            theme_toggle: ".theme-toggle".to_string(),
            reveal: ".reveal".to_string(),
            counter: "[data-counter]".to_string(),
            testimonial: ".testimonial".to_string(),
            testimonial_next: ".t-next".to_string(),
            testimonial_prev: ".t-prev".to_string(),
            filter_button: ".filter-btn".to_string(),
            portfolio_item: ".portfolio-item".to_string(),
            faq_item: ".faq-item".to_string(),
            faq_question: ".faq-question".to_string(),
            contact_form: "#contactForm".to_string(),
            form_status: "#formStatus".to_string(),
        }
    }
}

impl SelectorConfig {
    fn entries(&self) -> [(&'static str, &str); 15] {
        [
            ("selectors.nav_links", self.nav_links.as_str()),
            ("selectors.nav", self.nav.as_str()),
            ("selectors.nav_toggle", self.nav_toggle.as_str()),
            ("selectors.theme_toggle", self.theme_toggle.as_str()),
            ("selectors.reveal", self.reveal.as_str()),
            ("selectors.counter", self.counter.as_str()),
            ("selectors.testimonial", self.testimonial.as_str()),
            ("selectors.testimonial_next", self.testimonial_next.as_str()),
            ("selectors.testimonial_prev", self.testimonial_prev.as_str()),
            ("selectors.filter_button", self.filter_button.as_str()),
            ("selectors.portfolio_item", self.portfolio_item.as_str()),
            ("selectors.faq_item", self.faq_item.as_str()),
            ("selectors.faq_question", self.faq_question.as_str()),
            ("selectors.contact_form", self.contact_form.as_str()),
            ("selectors.form_status", self.form_status.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self { threshold: 0.18 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CounterConfig {
    pub threshold: f64,
    pub duration_ms: u64,
    pub suffix_min: f64,
    pub suffix: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            duration_ms: 900,
            suffix_min: 50.0,
            suffix: "+".to_string(),
        }
    }
}

impl CounterConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { interval_ms: 8000 }
    }
}

impl CarouselConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactConfig {
    pub sending_message: String,
    pub success_message: String,
    pub rejected_message: String,
    pub network_error_message: String,
    pub success_color: String,
    pub failure_color: String,
    pub timeout_seconds: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            sending_message: "Sending...".to_string(),
            success_message: "✅ Your message has been sent successfully.".to_string(),
            rejected_message: "❌ Something went wrong. Please try again or email us directly."
                .to_string(),
            network_error_message: "❌ Network error. Please check your internet and try again."
                .to_string(),
            success_color: "green".to_string(),
            failure_color: "red".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ContactConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Browser features the page script may rely on.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Capabilities {
    pub intersection_observer: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            intersection_observer: true,
        }
    }
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| SiteError::ConfigParse {
            message: e.to_string(),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("storage.theme_key", &self.storage.theme_key)?;
        validate_range("reveal.threshold", self.reveal.threshold, 0.0, 1.0)?;
        validate_range("counter.threshold", self.counter.threshold, 0.0, 1.0)?;
        validate_positive_number("counter.duration_ms", self.counter.duration_ms, 1)?;
        validate_positive_number("carousel.interval_ms", self.carousel.interval_ms, 1)?;
        validate_positive_number("contact.timeout_seconds", self.contact.timeout_seconds, 1)?;
        for (field, selector) in self.selectors.entries() {
            validate_selector(field, selector)?;
        }
        Ok(())
    }
}
