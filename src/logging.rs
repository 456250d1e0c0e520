//! Browser logging setup.
//!
//! Call `init()` once from the WASM entry point. Panics are forwarded to the
//! console and the `log` facade writes through `console.log`. Native builds
//! keep `leptos::logging` output on stdout/stderr and `init()` does nothing.

#[cfg(feature = "hydrate")]
const LOG_LEVEL: log::Level = log::Level::Debug;

/// Install the panic hook and console logger.
pub fn init() {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(LOG_LEVEL).is_err() {
            leptos::logging::warn!("console logger already installed");
        }
    }
}
