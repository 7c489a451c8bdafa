cfg_if::cfg_if! { if #[cfg(feature = "ssr")] {
    use spa_system_menu::{
        server::{router, AppState, Env, ServerConfig},
        sessions::MemorySessions,
    };
    use std::sync::Arc;
}}

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    match dotenvy::dotenv() {
        Ok(path) => println!(".env read successfully from {}", path.display()),
        Err(e) => println!(
            "Could not load .env file: {e}. \nProceeding assuming variables are set in the \
             environment."
        ),
    };

    let config = ServerConfig::from_env().expect("server configuration to be valid");

    // setup logging
    match config.env {
        // when in PROD mode suppress non-error logs
        Env::Prod => simple_logger::SimpleLogger::new()
            .with_level(log::LevelFilter::Error)
            .init()
            .expect("couldn't initialize logging"),
        // when in DEV mode suppress most logs from other crates, show all logs from this crate
        Env::Dev => simple_logger::SimpleLogger::new()
            .with_level(log::LevelFilter::Warn)
            .with_module_level("spa_system_menu", log::LevelFilter::Trace)
            .init()
            .expect("couldn't initialize logging"),
    };

    if config.dev_user.is_none() {
        log::warn!("DEV_IDENTITY/DEV_PASSWORD not set, nobody will be able to log in");
    }
    log::debug!("Server {:#?}", config);

    let state = AppState {
        sessions: MemorySessions::new(config.dev_user.clone()),
        site_root: Arc::from(config.site_root.as_str()),
    };
    let app = router(state);

    log::info!("listening on http://{}", &config.site_addr);
    let listener = tokio::net::TcpListener::bind(config.site_addr)
        .await
        .expect("site address to be available");
    axum::serve(listener, app).await.unwrap();
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for the wasm entry points instead
}
