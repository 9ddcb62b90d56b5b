//! Options for the Fancybox gallery binding

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LightboxOptions {
    /// `null` keeps links from opening in a new tab
    pub target: Option<String>,
    pub main_class: String,
    pub show_class: bool,
    pub hide_class: bool,
    #[serde(rename = "Image")]
    pub image: ImageOptions,
    pub keyboard: KeyboardOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageOptions {
    pub zoom: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyboardOptions {
    #[serde(rename = "Escape")]
    pub escape: String,
}

impl Default for LightboxOptions {
    fn default() -> Self {
        Self {
            target: None,
            main_class: "fancybox-inline".to_string(),
            show_class: false,
            hide_class: false,
            image: ImageOptions { zoom: false },
            keyboard: KeyboardOptions {
                escape: "close".to_string(),
            },
        }
    }
}

/// Caption for a gallery item from its caption attribute
pub fn caption_for(attribute: Option<String>) -> String {
    attribute.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_shape() {
        let json = serde_json::to_value(LightboxOptions::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "target": null,
                "mainClass": "fancybox-inline",
                "showClass": false,
                "hideClass": false,
                "Image": { "zoom": false },
                "keyboard": { "Escape": "close" },
            })
        );
    }

    #[test]
    fn test_missing_caption_is_empty() {
        assert_eq!(caption_for(None), "");
        assert_eq!(caption_for(Some("Caldeira".to_string())), "Caldeira");
    }
}
