mod api;
mod components;
pub mod config;
mod pages;
mod query;
mod router;
mod state;
#[cfg(test)]
mod test_support;
pub mod utils;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already installed: {}", err).into());
    }
    log::info!("Starting Fleet Admin frontend");

    // Endpoint resolution is lazy; warming it here saves the first request a round trip.
    leptos::spawn_local(async move {
        config::init().await;
        log::debug!("runtime config initialized");
    });

    router::mount_app();
}
