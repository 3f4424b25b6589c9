/// Conditional logging for development builds
///
/// The `log!` macro writes informational messages to the browser console and is
/// compiled out in release builds unless the `console_logging` feature is on.
/// `log_warn!` and `log_error!` are always active in the browser.
///
/// All three expand to nothing on non-wasm targets so domain code stays callable
/// from native unit tests and benches.
///
/// # Examples
///
/// ```rust
/// use wayfinder_admin::log;
///
/// log!("Loaded map {}", "ground-floor");
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging")))]
        {
            web_sys::console::log_1(&format!($($arg),+).into());
        }
        #[cfg(not(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging"))))]
        {
            let _ = ($(&$arg),+);
        }
    };
}

/// Log a warning to the browser console
#[macro_export]
macro_rules! log_warn {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg),+).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = ($(&$arg),+);
        }
    };
}

/// Log an error to the browser console
#[macro_export]
macro_rules! log_error {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::error_1(&format!($($arg),+).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = ($(&$arg),+);
        }
    };
}

pub use log;
pub use log_error;
pub use log_warn;
