#![allow(warnings)]
//! ClearTick Frontend Entry Point

mod api;
mod app;
mod auth;
mod clock;
mod components;
mod config;
mod context;
mod error;
mod models;
mod profile;
mod session;
mod status;
mod store;
mod todos;

#[cfg(test)]
mod testing;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = config::AppConfig::from_build_env();
    // A second logger can only come from a test harness
    let _ = console_logger::init_logger(console_logger::level_from_name(Some(&config.log_level)));

    mount_to_body(App);
}
