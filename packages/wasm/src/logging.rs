//! Console logging.
//!
//! Messages go to the browser console through `web_sys`. On native targets
//! (unit tests) they are dropped, since JS imports cannot be called there.

/// Log a formatted message to the browser console.
macro_rules! console_log {
    ($($arg:tt)*) => {
        $crate::logging::log(&format!($($arg)*))
    };
}

pub(crate) use console_log;

/// Write a message to the browser console.
#[cfg(target_arch = "wasm32")]
pub(crate) fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

/// Native builds have no console to write to.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn log(_message: &str) {}

/// Route panics to `console.error`.
pub(crate) fn install_panic_hook() {
    console_error_panic_hook::set_once();
}
