use crate::{
    browser::BrowserHost,
    defs::{LOGOUT_TEXT, ROOT_TEXT},
    logout::logout,
};
use leptos::{prelude::*, task::spawn_local};
use wasm_bindgen::prelude::*;

/// Renders the system menu for apps that build their page with Leptos
/// instead of going through the [`Shell`](crate::browser::Shell).
#[component]
pub fn SystemMenu() -> impl IntoView {
    let on_logout = move |_: leptos::ev::MouseEvent| match BrowserHost::new() {
        Ok(host) => spawn_local(async move {
            logout(&host).await;
        }),
        Err(e) => log::error!("{e}"),
    };

    view! {
        <div class="system-menu">
            {ROOT_TEXT}
            <div class="logout-button" on:click=on_logout>{LOGOUT_TEXT}</div>
        </div>
    }
}

#[wasm_bindgen]
pub fn mount_system_menu() {
    _ = leptos::task::Executor::init_wasm_bindgen();
    leptos::mount::mount_to_body(SystemMenu);
}
