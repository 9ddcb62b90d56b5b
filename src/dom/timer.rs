//! Browser timers

use super::window;
use crate::error::UiResult;
use std::cell::Cell;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

fn delay_ms(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

/// A restartable `setTimeout` bound to one long-lived callback
///
/// The callback closure lives as long as the timer, so restarting from
/// inside the callback itself is safe. Restarting clears the pending
/// timeout first; dropping clears it too.
pub struct Timer {
    callback: Closure<dyn FnMut()>,
    handle: Cell<Option<i32>>,
}

impl Timer {
    pub fn new<F>(on_fire: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self {
            callback: Closure::wrap(Box::new(on_fire) as Box<dyn FnMut()>),
            handle: Cell::new(None),
        }
    }

    pub fn restart(&self, delay: Duration) -> UiResult<()> {
        self.cancel();
        let handle = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.callback.as_ref().unchecked_ref(),
            delay_ms(delay),
        )?;
        self.handle.set(Some(handle));
        Ok(())
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Resolve after `delay`
pub async fn sleep(delay: Duration) -> UiResult<()> {
    let window = window()?;
    let ms = delay_ms(delay);
    let mut scheduled = Ok(0);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
    });
    scheduled?;
    JsFuture::from(promise).await?;
    Ok(())
}
