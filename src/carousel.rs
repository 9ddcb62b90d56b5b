//! Carousel controller
//!
//! Tracks which of N slides is active and when the next automatic rotation
//! is due. Slides are numbered from 1, matching the `radio1..radioN` inputs
//! that drive the CSS slider.

use crate::error::{UiError, UiResult};
use crate::time::{Deadline, Timestamp};
use std::fmt;
use std::time::Duration;

/// 1-based position of a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlideIndex(usize);

impl SlideIndex {
    pub const FIRST: SlideIndex = SlideIndex(1);

    /// Returns None for 0
    pub fn new(position: usize) -> Option<Self> {
        (position >= 1).then_some(Self(position))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlideIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keyboard keys the carousel reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// ArrowLeft on the carousel root
    Previous,
    /// ArrowRight on the carousel root
    Next,
    /// Enter or Space on a nav button
    Activate,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(NavKey::Previous),
            "ArrowRight" => Some(NavKey::Next),
            "Enter" | " " => Some(NavKey::Activate),
            _ => None,
        }
    }
}

/// Manual navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    /// Direct selection by 1-based position
    Select(usize),
}

/// Rendering capability for the carousel markup
pub trait CarouselSurface {
    /// Check the selection input that shows `index`
    fn show_slide(&self, index: SlideIndex);
    /// Set `aria-selected` on the nav button at `position`
    fn set_nav_selected(&self, position: SlideIndex, selected: bool);
}

/// Rotation index plus the auto-rotation deadline
#[derive(Debug, Clone)]
pub struct Carousel {
    current: SlideIndex,
    count: usize,
    interval: Duration,
    rotation: Deadline,
}

impl Carousel {
    /// Start on slide 1 with the rotation timer armed
    pub fn new(count: usize, interval: Duration, now: Timestamp) -> UiResult<Self> {
        if count == 0 {
            return Err(UiError::Config("carousel needs at least one slide".to_string()));
        }
        let mut rotation = Deadline::default();
        rotation.arm(now, interval);
        Ok(Self {
            current: SlideIndex::FIRST,
            count,
            interval,
            rotation,
        })
    }

    pub fn current(&self) -> SlideIndex {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.count
    }

    pub fn rotation_deadline(&self) -> Option<Timestamp> {
        self.rotation.at()
    }

    /// Next slide, wrapping N -> 1; restarts the rotation timer
    pub fn advance(&mut self, now: Timestamp) -> SlideIndex {
        self.current = self.following();
        self.restart_rotation(now);
        self.current
    }

    /// Previous slide, wrapping 1 -> N; restarts the rotation timer
    pub fn retreat(&mut self, now: Timestamp) -> SlideIndex {
        self.current = self.preceding();
        self.restart_rotation(now);
        self.current
    }

    /// Jump to a 1-based position; restarts the rotation timer
    pub fn select(&mut self, position: usize, now: Timestamp) -> UiResult<SlideIndex> {
        if position == 0 || position > self.count {
            return Err(UiError::SlideOutOfRange {
                requested: position,
                count: self.count,
            });
        }
        self.current = SlideIndex(position);
        self.restart_rotation(now);
        Ok(self.current)
    }

    pub fn navigate(&mut self, navigation: Navigation, now: Timestamp) -> UiResult<SlideIndex> {
        match navigation {
            Navigation::Next => Ok(self.advance(now)),
            Navigation::Previous => Ok(self.retreat(now)),
            Navigation::Select(position) => self.select(position, now),
        }
    }

    /// Automatic rotation; steps forward when the deadline has passed
    pub fn tick(&mut self, now: Timestamp) -> Option<SlideIndex> {
        if !self.rotation.fire_if_due(now) {
            return None;
        }
        self.current = self.following();
        self.rotation.arm(now, self.interval);
        Some(self.current)
    }

    /// `(position, selected)` for every nav button; exactly one is selected
    pub fn nav_states(&self) -> impl Iterator<Item = (SlideIndex, bool)> + '_ {
        (1..=self.count).map(move |p| (SlideIndex(p), p == self.current.0))
    }

    /// Show the current slide and sync every nav button
    pub fn render(&self, surface: &dyn CarouselSurface) {
        surface.show_slide(self.current);
        self.render_nav(surface);
    }

    pub fn render_nav(&self, surface: &dyn CarouselSurface) {
        for (position, selected) in self.nav_states() {
            surface.set_nav_selected(position, selected);
        }
    }

    fn following(&self) -> SlideIndex {
        SlideIndex(self.current.0 % self.count + 1)
    }

    fn preceding(&self) -> SlideIndex {
        SlideIndex((self.current.0 + self.count - 2) % self.count + 1)
    }

    fn restart_rotation(&mut self, now: Timestamp) {
        self.rotation.arm(now, self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(8000);

    fn ms(v: u64) -> Timestamp {
        Timestamp::from_millis(v)
    }

    fn carousel(count: usize) -> Carousel {
        Carousel::new(count, INTERVAL, Timestamp::ZERO).unwrap()
    }

    #[test]
    fn test_advance_wraps_to_first() {
        let mut c = carousel(3);
        c.select(3, ms(0)).unwrap();
        assert_eq!(c.advance(ms(0)).get(), 1);
    }

    #[test]
    fn test_retreat_wraps_to_last() {
        let mut c = carousel(3);
        assert_eq!(c.retreat(ms(0)).get(), 3);
        assert_eq!(c.retreat(ms(0)).get(), 2);
    }

    #[test]
    fn test_n_advances_cycle_back() {
        for count in 1..=6 {
            for start in 1..=count {
                let mut c = carousel(count);
                c.select(start, ms(0)).unwrap();
                for _ in 0..count {
                    c.advance(ms(0));
                }
                assert_eq!(c.current().get(), start, "count={count} start={start}");
            }
        }
    }

    #[test]
    fn test_single_slide_stays_put() {
        let mut c = carousel(1);
        assert_eq!(c.advance(ms(0)).get(), 1);
        assert_eq!(c.retreat(ms(0)).get(), 1);
    }

    #[test]
    fn test_select_out_of_range_keeps_state() {
        let mut c = carousel(3);
        c.select(2, ms(0)).unwrap();
        let deadline = c.rotation_deadline();

        let err = c.select(4, ms(100)).unwrap_err();
        assert!(matches!(err, UiError::SlideOutOfRange { requested: 4, count: 3 }));
        assert!(c.select(0, ms(100)).is_err());
        assert_eq!(c.current().get(), 2);
        assert_eq!(c.rotation_deadline(), deadline);
    }

    #[test]
    fn test_exactly_one_nav_selected() {
        let mut c = carousel(4);
        for step in 0..9 {
            let selected = c.nav_states().filter(|(_, s)| *s).count();
            assert_eq!(selected, 1, "step {step}");
            c.advance(ms(step));
        }
    }

    #[test]
    fn test_tick_rotates_on_interval() {
        let mut c = carousel(3);
        assert_eq!(c.tick(ms(7999)), None);
        assert_eq!(c.tick(ms(8000)).map(SlideIndex::get), Some(2));
        assert_eq!(c.rotation_deadline(), Some(ms(16_000)));
    }

    #[test]
    fn test_manual_navigation_restarts_rotation() {
        let mut c = carousel(3);
        c.advance(ms(5000));
        assert_eq!(c.rotation_deadline(), Some(ms(13_000)));
        assert_eq!(c.tick(ms(8000)), None);
        assert_eq!(c.tick(ms(13_000)).map(SlideIndex::get), Some(3));
    }

    #[test]
    fn test_nav_key_mapping() {
        assert_eq!(NavKey::from_key("ArrowLeft"), Some(NavKey::Previous));
        assert_eq!(NavKey::from_key("ArrowRight"), Some(NavKey::Next));
        assert_eq!(NavKey::from_key(" "), Some(NavKey::Activate));
        assert_eq!(NavKey::from_key("Enter"), Some(NavKey::Activate));
        assert_eq!(NavKey::from_key("Tab"), None);
    }

    #[test]
    fn test_zero_slides_rejected() {
        assert!(Carousel::new(0, INTERVAL, Timestamp::ZERO).is_err());
    }
}
