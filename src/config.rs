//! Site configuration
//!
//! Every value has a default matching the stock site markup. A page can
//! override any subset through an inline JSON block:
//!
//! ```html
//! <script type="application/json" id="site-config">
//!   { "carousel": { "slide_count": 4 }, "contact_form": { "submission": { "mode": "http", "endpoint": "/api/contact" } } }
//! </script>
//! ```

use crate::error::{UiError, UiResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Id of the inline JSON element the runtime reads overrides from
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Top-level configuration for the whole page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub carousel: CarouselConfig,
    pub menu: MenuConfig,
    /// Quiet period before a resize burst re-syncs carousel and menu
    pub resize_debounce_ms: u64,
    pub fragments: FragmentsConfig,
    pub navbar: NavbarConfig,
    pub lightbox: LightboxConfig,
    pub contact_form: ContactFormConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            carousel: CarouselConfig::default(),
            menu: MenuConfig::default(),
            resize_debounce_ms: 250,
            fragments: FragmentsConfig::default(),
            navbar: NavbarConfig::default(),
            lightbox: LightboxConfig::default(),
            contact_form: ContactFormConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parse overrides from JSON and validate the merged result
    pub fn from_json(json: &str) -> UiResult<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> UiResult<()> {
        if self.carousel.slide_count == 0 {
            return Err(UiError::Config(
                "carousel.slide_count must be at least 1".to_string(),
            ));
        }
        if self.carousel.rotation_interval_ms == 0 {
            return Err(UiError::Config(
                "carousel.rotation_interval_ms must be positive".to_string(),
            ));
        }
        if self.contact_form.banner_ms == 0 {
            return Err(UiError::Config(
                "contact_form.banner_ms must be positive".to_string(),
            ));
        }
        if let SubmissionConfig::Http { endpoint } = &self.contact_form.submission {
            if endpoint.trim().is_empty() {
                return Err(UiError::Config(
                    "contact_form.submission.endpoint must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

// =============================================================================
// CAROUSEL
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub root_selector: String,
    /// Radio inputs driving the CSS slides are `{prefix}1..={slide_count}`
    pub radio_id_prefix: String,
    pub nav_button_selector: String,
    pub prev_selector: String,
    pub next_selector: String,
    pub slide_count: usize,
    pub rotation_interval_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            root_selector: ".slider".to_string(),
            radio_id_prefix: "radio".to_string(),
            nav_button_selector: ".manual-btn".to_string(),
            prev_selector: ".prev-arrow".to_string(),
            next_selector: ".next-arrow".to_string(),
            slide_count: 3,
            rotation_interval_ms: 8000,
        }
    }
}

impl CarouselConfig {
    pub fn rotation_interval(&self) -> Duration {
        Duration::from_millis(self.rotation_interval_ms)
    }
}

// =============================================================================
// MENU
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub panel_selector: String,
    pub button_selector: String,
    pub open_class: String,
    /// Viewports strictly wider than this force the mobile menu closed
    pub breakpoint_px: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            panel_selector: ".mobile-menu".to_string(),
            button_selector: ".mobile-menu-icon button".to_string(),
            open_class: "open".to_string(),
            breakpoint_px: 768,
        }
    }
}

// =============================================================================
// FRAGMENTS / NAVBAR / LIGHTBOX
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentSlotConfig {
    pub placeholder_id: String,
    pub url: String,
}

/// Fragment slots; keys left out of an override keep the slot's own default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FragmentsOverride")]
pub struct FragmentsConfig {
    pub header: FragmentSlotConfig,
    pub footer: FragmentSlotConfig,
}

impl Default for FragmentsConfig {
    fn default() -> Self {
        Self {
            header: FragmentSlotConfig {
                placeholder_id: "header-placeholder".to_string(),
                url: "header.html".to_string(),
            },
            footer: FragmentSlotConfig {
                placeholder_id: "footer-placeholder".to_string(),
                url: "footer.html".to_string(),
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SlotOverride {
    placeholder_id: Option<String>,
    url: Option<String>,
}

impl SlotOverride {
    fn apply(self, base: FragmentSlotConfig) -> FragmentSlotConfig {
        FragmentSlotConfig {
            placeholder_id: self.placeholder_id.unwrap_or(base.placeholder_id),
            url: self.url.unwrap_or(base.url),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FragmentsOverride {
    header: SlotOverride,
    footer: SlotOverride,
}

impl From<FragmentsOverride> for FragmentsConfig {
    fn from(overrides: FragmentsOverride) -> Self {
        let defaults = FragmentsConfig::default();
        Self {
            header: overrides.header.apply(defaults.header),
            footer: overrides.footer.apply(defaults.footer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub selector: String,
    pub link_selector: String,
    pub active_class: String,
    pub scrolled_class: String,
    pub scroll_threshold_px: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            selector: ".nav-bar".to_string(),
            link_selector: ".nav-link".to_string(),
            active_class: "active".to_string(),
            scrolled_class: "scrolled".to_string(),
            scroll_threshold_px: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    pub gallery_selector: String,
    pub caption_attribute: String,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            gallery_selector: r#"[data-fancybox="gallery"]"#.to_string(),
            caption_attribute: "data-caption".to_string(),
        }
    }
}

// =============================================================================
// CONTACT FORM
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactFormConfig {
    pub form_id: String,
    pub group_selector: String,
    pub submit_label: String,
    pub submitting_label: String,
    pub messages: FormMessages,
    /// Lifetime of the success/error banner
    pub banner_ms: u64,
    pub submission: SubmissionConfig,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            form_id: "contact-form".to_string(),
            group_selector: ".form-group".to_string(),
            submit_label: "Enviar Mensagem".to_string(),
            submitting_label: "Enviando...".to_string(),
            messages: FormMessages::default(),
            banner_ms: 5000,
            submission: SubmissionConfig::default(),
        }
    }
}

impl ContactFormConfig {
    pub fn banner_lifetime(&self) -> Duration {
        Duration::from_millis(self.banner_ms)
    }
}

/// User-facing texts for field errors and banners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormMessages {
    pub required: String,
    pub email: String,
    pub phone: String,
    pub sent: String,
    pub failed: String,
}

impl Default for FormMessages {
    fn default() -> Self {
        Self {
            required: "Este campo é obrigatório".to_string(),
            email: "Por favor, insira um email válido".to_string(),
            phone: "Por favor, insira um telefone válido (ex: (11) 99999-9999)".to_string(),
            sent: "Mensagem enviada com sucesso! Entraremos em contato em breve.".to_string(),
            failed: "Erro ao enviar mensagem. Por favor, tente novamente.".to_string(),
        }
    }
}

/// How a validated form is delivered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SubmissionConfig {
    /// Wait `delay_ms` and report success
    Simulated {
        #[serde(default = "default_simulated_delay_ms")]
        delay_ms: u64,
    },
    /// POST the fields as JSON
    Http { endpoint: String },
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        SubmissionConfig::Simulated {
            delay_ms: default_simulated_delay_ms(),
        }
    }
}

fn default_simulated_delay_ms() -> u64 {
    1500
}
