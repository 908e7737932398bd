use log::{error, info};

mod app;
mod config;
mod dom;
mod error;
mod site;

mod components {
    pub mod anchors;
    pub mod contact_form;
    pub mod event_filter;
    pub mod hero_slideshow;
    pub mod menu;
    pub mod scroll_reveal;
    pub mod view_toggle;
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting site behaviors");
    if let Err(e) = app::start() {
        error!("Failed to mount site behaviors: {}", e);
    }
}
