use dioxus::prelude::*;

mod api;
mod app;
mod components;
mod config;
mod error;
mod list;
mod notify;
mod pages;
mod poll;
mod shared;
mod stats;
mod utils;

pub const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

#[cfg(feature = "server")]
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() {
    #[cfg(feature = "server")]
    {
        // DASHBOARD_* settings may live in a .env next to the binary
        dotenvy::dotenv().ok();
        init_tracing();
    }
    dioxus::launch(app::App);
}
