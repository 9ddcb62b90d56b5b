//! Menu, viewport debounce and component attachment

mod common;

use common::{init_tracing, ms, CarouselLog, MenuLog, RecordingCarousel, RecordingMenu, NAME};
use inspec_ui::config::SubmissionConfig;
use inspec_ui::{NavKey, SiteConfig, SitePage};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

fn menu_page() -> (SitePage, Rc<RefCell<MenuLog>>) {
    init_tracing();
    let log = Rc::new(RefCell::new(MenuLog::default()));
    let mut page = SitePage::new(SiteConfig::default());
    page.attach_menu(Box::new(RecordingMenu(log.clone())));
    (page, log)
}

#[test]
fn test_menu_starts_closed() {
    let (page, log) = menu_page();
    assert_eq!(page.menu().map(|m| m.is_open()), Some(false));
    assert!(!log.borrow().panel_open);
    assert_eq!(log.borrow().renders, 1);
}

#[test]
fn test_double_toggle_restores_state() {
    let (mut page, log) = menu_page();

    assert_eq!(page.toggle_menu(), Some(true));
    assert!(log.borrow().panel_open);
    assert!(log.borrow().button_open);

    assert_eq!(page.toggle_menu(), Some(false));
    assert!(!log.borrow().panel_open);
    assert!(!log.borrow().button_open);
}

#[test]
fn test_resize_closes_menu_after_debounce() {
    let (mut page, log) = menu_page();
    page.toggle_menu();
    let renders = log.borrow().renders;

    page.viewport_resized(900, ms(1000));
    page.viewport_resized(1024, ms(1100));
    page.viewport_resized(1280, ms(1200));
    assert_eq!(page.next_wakeup(), Some(ms(1450)));

    page.poll_timers(ms(1449));
    assert!(log.borrow().panel_open);

    page.poll_timers(ms(1450));
    assert!(!log.borrow().panel_open);
    assert_eq!(log.borrow().renders, renders + 1);
    assert_eq!(page.next_wakeup(), None);

    // Settled: later polls do nothing
    page.poll_timers(ms(5000));
    assert_eq!(log.borrow().renders, renders + 1);
}

#[test]
fn test_resize_at_breakpoint_keeps_menu_open() {
    let (mut page, log) = menu_page();
    page.toggle_menu();

    page.viewport_resized(768, ms(0));
    page.poll_timers(ms(250));

    assert!(log.borrow().panel_open);
    assert_eq!(page.menu().map(|m| m.is_open()), Some(true));
}

#[test]
fn test_resize_resyncs_carousel_nav() {
    init_tracing();
    let log = Rc::new(RefCell::new(CarouselLog::default()));
    let mut page = SitePage::new(SiteConfig::default());
    page.attach_carousel(Box::new(RecordingCarousel(log.clone())), ms(0))
        .unwrap();
    page.carousel_key(NavKey::Next, ms(10)).unwrap();
    log.borrow_mut().aria.clear();

    page.viewport_resized(400, ms(100));
    page.poll_timers(ms(350));

    assert_eq!(log.borrow().selected_positions(), vec![2]);
    assert_eq!(log.borrow().aria.len(), 3);
}

#[test]
fn test_reattach_menu_keeps_state() {
    let (mut page, first) = menu_page();
    page.toggle_menu();

    let second = Rc::new(RefCell::new(MenuLog::default()));
    page.attach_menu(Box::new(RecordingMenu(second.clone())));
    assert!(second.borrow().panel_open);
    assert_eq!(second.borrow().renders, 1);

    page.toggle_menu();
    assert!(!second.borrow().panel_open);
    // The replaced surface no longer receives renders
    assert!(first.borrow().panel_open);
}

#[test]
fn test_absent_components_are_ignored() {
    let mut page = SitePage::new(SiteConfig::default());

    assert_eq!(page.toggle_menu(), None);
    page.viewport_resized(1280, ms(0));
    page.poll_timers(ms(250));
    page.field_input(NAME, "Ana").unwrap();
    page.field_blur(NAME).unwrap();

    assert!(page.menu().is_none());
    assert!(page.contact_form().is_none());
    assert_eq!(page.next_wakeup(), None);
}

#[test]
fn test_config_overrides_from_json() {
    let config = SiteConfig::from_json(
        r#"{
            "menu": {"breakpoint_px": 1024},
            "resize_debounce_ms": 100,
            "contact_form": {"submission": {"mode": "http", "endpoint": "/api/contact"}}
        }"#,
    )
    .unwrap();
    assert_eq!(
        config.contact_form.submission,
        SubmissionConfig::Http {
            endpoint: "/api/contact".to_string()
        }
    );

    let log = Rc::new(RefCell::new(MenuLog::default()));
    let mut page = SitePage::new(config);
    page.attach_menu(Box::new(RecordingMenu(log.clone())));
    page.toggle_menu();

    page.viewport_resized(1000, ms(0));
    assert_eq!(page.next_wakeup(), Some(ms(100)));
    page.poll_timers(ms(100));
    assert!(log.borrow().panel_open);

    page.viewport_resized(1100, ms(200));
    page.poll_timers(ms(300));
    assert!(!log.borrow().panel_open);
}
