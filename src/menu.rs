//! Mobile navigation menu toggle

/// Rendering capability for the menu panel and its toggle button
pub trait MenuSurface {
    /// Apply or remove the open class on both the panel and the button
    fn set_open(&self, open: bool);
}

/// Open/closed state of the mobile menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
    breakpoint_px: u32,
}

impl MenuState {
    pub fn new(breakpoint_px: u32) -> Self {
        Self {
            open: false,
            breakpoint_px,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the state and return the new value
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Force the menu closed on desktop-width viewports
    ///
    /// Returns true when the width is above the breakpoint, whatever the
    /// prior state was.
    pub fn on_viewport_width(&mut self, width: u32) -> bool {
        if width > self.breakpoint_px {
            self.open = false;
            true
        } else {
            false
        }
    }

    pub fn render(&self, surface: &dyn MenuSurface) {
        surface.set_open(self.open);
    }
}
