//! Header/footer fragment loading and the navbar behaviors that depend on it

use super::{document, query, query_all, window};
use crate::chrome::{
    current_page, link_is_current, navbar_is_scrolled, Fragment, FOOTER_CONTENT_STYLES,
    FOOTER_COPYRIGHT_STYLES, FOOTER_STYLES,
};
use crate::config::{FragmentsConfig, NavbarConfig};
use crate::error::{UiError, UiResult};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement, Response};

/// Fetch a URL as text; non-2xx responses are errors
pub(crate) async fn fetch_text(url: &str) -> UiResult<String> {
    let response: Response = JsFuture::from(window()?.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(UiError::Fetch {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let text = JsFuture::from(response.text()?).await?;
    Ok(text.as_string().unwrap_or_default())
}

/// Fetch a fragment and inject it into its placeholder
///
/// Ok(false) when the page has no placeholder for it.
pub(crate) async fn load(fragment: Fragment, config: &FragmentsConfig) -> UiResult<bool> {
    let slot = fragment.slot(config);
    let Some(placeholder) = document()?.get_element_by_id(&slot.placeholder_id) else {
        return Ok(false);
    };
    let html = fetch_text(&slot.url).await?;
    placeholder.set_inner_html(&html);
    tracing::debug!(fragment = fragment.name(), bytes = html.len(), "fragment injected");
    Ok(true)
}

/// Mark the nav link for the current page as active
pub(crate) fn highlight_current_page(document: &Document, config: &NavbarConfig) -> UiResult<()> {
    let pathname = window()?.location().pathname()?;
    let page = current_page(&pathname);
    for link in query_all(document, &config.link_selector) {
        let href = link.get_attribute("href").unwrap_or_default();
        link.class_list()
            .toggle_with_force(&config.active_class, link_is_current(&href, page))?;
    }
    Ok(())
}

/// Apply or clear the navbar's scrolled class for the current offset
pub(crate) fn sync_navbar(document: &Document, config: &NavbarConfig) -> UiResult<()> {
    let Some(navbar) = query(document, &config.selector) else {
        return Ok(());
    };
    let scrolled = navbar_is_scrolled(window()?.scroll_y()?, config.scroll_threshold_px);
    navbar
        .class_list()
        .toggle_with_force(&config.scrolled_class, scrolled)?;
    Ok(())
}

fn apply_styles(element: &Element, styles: &[(&str, &str)]) -> UiResult<()> {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return Ok(());
    };
    let style = element.style();
    for (property, value) in styles {
        style.set_property(property, value)?;
    }
    Ok(())
}

/// Force the footer to span the full viewport width
pub(crate) fn fix_footer_width(document: &Document) -> UiResult<()> {
    let (Some(footer), Some(content)) = (
        query(document, "footer"),
        document.get_element_by_id("footer_content"),
    ) else {
        return Ok(());
    };
    apply_styles(&footer, FOOTER_STYLES)?;
    apply_styles(&content, FOOTER_CONTENT_STYLES)?;
    if let Some(copyright) = query(document, ".footer_copyright") {
        apply_styles(&copyright, FOOTER_COPYRIGHT_STYLES)?;
    }
    Ok(())
}
