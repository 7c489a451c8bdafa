pub mod config;
pub mod cookies;
pub mod defs;
pub mod fileserv;
pub mod host;
pub mod logout;
pub mod registry;
pub mod security;
pub mod server;
pub mod sessions;
pub mod widget;

#[cfg(test)]
mod testing;

pub use config::{SystemMenuConfig, WidgetConfig};
pub use host::Host;
pub use logout::{logout, LogoutOutcome};
pub use registry::{init, register, WidgetFactory, WidgetRegistry};
pub use widget::{LogoutWidget, Widget};

use cfg_if::cfg_if;
cfg_if! { if #[cfg(feature = "csr")] {
    pub mod browser;
    pub mod component;

    #[wasm_bindgen::prelude::wasm_bindgen]
    pub fn start() {
        _ = console_log::init_with_level(log::Level::Debug);
        console_error_panic_hook::set_once();
        _ = leptos::task::Executor::init_wasm_bindgen();
    }
}}
