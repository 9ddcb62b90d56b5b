//! Fancybox gallery binding

use super::{document, window};
use crate::config::LightboxConfig;
use crate::error::UiResult;
use crate::lightbox::{caption_for, LightboxOptions};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

pub(crate) type CaptionCallback = Closure<dyn Fn(JsValue, JsValue) -> JsValue>;

/// Bind the gallery if the Fancybox script is loaded
///
/// Returns the caption callback, which must outlive the binding.
pub(crate) fn bind(config: &LightboxConfig) -> UiResult<Option<CaptionCallback>> {
    let fancybox = js_sys::Reflect::get(&window()?, &"Fancybox".into())?;
    if fancybox.is_undefined() || fancybox.is_null() {
        tracing::debug!("Fancybox not loaded, gallery binding skipped");
        return Ok(None);
    }
    let bind_fn: js_sys::Function = js_sys::Reflect::get(&fancybox, &"bind".into())?.dyn_into()?;

    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let options = LightboxOptions::default()
        .serialize(&serializer)
        .map_err(JsValue::from)?;
    if let Some(body) = document()?.body() {
        js_sys::Reflect::set(&options, &"parentEl".into(), &body)?;
    }

    let attribute = config.caption_attribute.clone();
    let caption: CaptionCallback = Closure::wrap(Box::new(move |_fancybox: JsValue, slide: JsValue| {
        let text = js_sys::Reflect::get(&slide, &"triggerEl".into())
            .ok()
            .and_then(|el| el.dyn_into::<Element>().ok())
            .and_then(|el| el.get_attribute(&attribute));
        JsValue::from_str(&caption_for(text))
    }) as Box<dyn Fn(JsValue, JsValue) -> JsValue>);
    js_sys::Reflect::set(&options, &"caption".into(), caption.as_ref())?;

    bind_fn.call2(&fancybox, &JsValue::from_str(&config.gallery_selector), &options)?;
    tracing::debug!(selector = %config.gallery_selector, "gallery bound");
    Ok(Some(caption))
}
