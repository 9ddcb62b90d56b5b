//! Carousel rotation through the page controller

mod common;

use common::{init_tracing, ms, CarouselLog, RecordingCarousel};
use inspec_ui::{NavKey, Navigation, SiteConfig, SitePage, UiError};
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

fn carousel_page() -> (SitePage, Rc<RefCell<CarouselLog>>) {
    init_tracing();
    let log = Rc::new(RefCell::new(CarouselLog::default()));
    let mut page = SitePage::new(SiteConfig::default());
    page.attach_carousel(Box::new(RecordingCarousel(log.clone())), ms(0))
        .unwrap();
    (page, log)
}

#[test]
fn test_attach_shows_first_slide() {
    let (page, log) = carousel_page();
    assert_eq!(log.borrow().current(), Some(1));
    assert_eq!(log.borrow().selected_positions(), vec![1]);
    assert_eq!(page.next_wakeup(), Some(ms(8000)));
}

#[test]
fn test_auto_rotation_cycles() {
    let (mut page, log) = carousel_page();
    for (t, expected) in [(8000, 2), (16_000, 3), (24_000, 1)] {
        page.poll_timers(ms(t));
        assert_eq!(log.borrow().current(), Some(expected), "at {t}ms");
        assert_eq!(log.borrow().selected_positions(), vec![expected]);
    }
}

#[test]
fn test_manual_navigation_resets_rotation() {
    let (mut page, log) = carousel_page();

    page.navigate(Navigation::Next, ms(5000)).unwrap();
    assert_eq!(log.borrow().current(), Some(2));
    assert_eq!(page.next_wakeup(), Some(ms(13_000)));

    // The first 8s deadline no longer fires
    page.poll_timers(ms(8000));
    page.poll_timers(ms(12_999));
    assert_eq!(log.borrow().current(), Some(2));

    page.poll_timers(ms(13_000));
    assert_eq!(log.borrow().current(), Some(3));
}

#[test]
fn test_arrow_keys_wrap() {
    let (mut page, log) = carousel_page();

    assert!(page.carousel_key(NavKey::Previous, ms(10)).unwrap());
    assert_eq!(log.borrow().current(), Some(3));

    assert!(page.carousel_key(NavKey::Next, ms(20)).unwrap());
    assert_eq!(log.borrow().current(), Some(1));

    assert!(!page.carousel_key(NavKey::Activate, ms(30)).unwrap());
    assert_eq!(page.next_wakeup(), Some(ms(8020)));
}

#[test]
fn test_nav_button_activation() {
    let (mut page, log) = carousel_page();

    assert!(page.nav_button_key(3, NavKey::Activate, ms(100)).unwrap());
    assert_eq!(log.borrow().current(), Some(3));
    assert_eq!(log.borrow().selected_positions(), vec![3]);

    assert!(!page.nav_button_key(2, NavKey::Next, ms(200)).unwrap());
    assert_eq!(log.borrow().current(), Some(3));
}

#[test]
fn test_select_out_of_range_is_rejected() {
    let (mut page, log) = carousel_page();
    let err = page.navigate(Navigation::Select(7), ms(100)).unwrap_err();
    assert!(matches!(err, UiError::SlideOutOfRange { requested: 7, count: 3 }));
    assert_eq!(log.borrow().current(), Some(1));
    assert_eq!(page.next_wakeup(), Some(ms(8000)));
}

#[test]
fn test_no_carousel_is_noop() {
    let mut page = SitePage::new(SiteConfig::default());
    assert_eq!(page.navigate(Navigation::Next, ms(0)).unwrap(), None);
    assert!(!page.carousel_key(NavKey::Next, ms(0)).unwrap());
    assert_eq!(page.next_wakeup(), None);
    page.poll_timers(ms(100_000));
}

#[test]
fn test_configured_slide_count() {
    let config = SiteConfig::from_json(r#"{"carousel": {"slide_count": 5, "rotation_interval_ms": 1000}}"#)
        .unwrap();
    let log = Rc::new(RefCell::new(CarouselLog::default()));
    let mut page = SitePage::new(config);
    page.attach_carousel(Box::new(RecordingCarousel(log.clone())), ms(0))
        .unwrap();

    page.navigate(Navigation::Previous, ms(0)).unwrap();
    assert_eq!(log.borrow().current(), Some(5));
    assert_eq!(log.borrow().aria.len(), 5);
    assert_eq!(page.next_wakeup(), Some(ms(1000)));
}
