//! Gift Registry Frontend Entry Point

mod app;
mod commands;
mod components;
mod context;
mod logging;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = context::build_config();
    logging::init(config.as_ref().is_ok_and(|c| c.debug_logging));
    mount_to_body(move || view! { <App config=config /> });
}
