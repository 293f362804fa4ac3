//! Party planner: a browser client for a small events / rsvps / guests CRUD service.
//!
//! Data flow: a user action (or the bootstrap) calls the remote service, a successful response
//! replaces one snapshot in [`AppState`], and the whole view is rebuilt from the state and swapped
//! into the page. There is no diffing and no local caching; the service is the source of truth.

pub mod api;
pub mod app;
pub mod bootstrap;
pub mod config;
pub mod dom;
pub mod model;
pub mod render;
pub mod state;
mod utils;
pub mod view;

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::LazyLock;

use sequenced::{Commit, Slot};
use wasm_bindgen::prelude::*;

pub use api::{HttpResources, Resources, TransportError};
pub use app::{App, Intent};
pub use bootstrap::{Running, launch};
pub use config::{ApiConfig, AppConfig};
pub use dom::{Dispatch, DomMount};
pub use render::{Mount, MountError};
pub use state::AppState;

type WebApp = App<HttpResources, DomMount>;

thread_local! {
    // the DOM listeners only hold a weak handle, this is what keeps the app alive
    static RUNNING: Running<WebApp> = RefCell::new(Slot::default());
}

static LOGGER: LazyLock<()> = LazyLock::new(|| {
    utils::set_panic_hook();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Logging initialized");
});

/// Mounts the app into the page and runs the initial load.
///
/// The most recently started boot owns the page: booting again with another config replaces the
/// running app once the new one has loaded, and an older boot that finishes later is discarded.
pub async fn boot(config: AppConfig) -> Result<Commit, MountError> {
    LazyLock::force(&LOGGER);

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| MountError::Dom("no document on window".to_string()))?;
    let container = DomMount::find_container(&document, &config.mount_selector)?;
    let resources = HttpResources::new(config.api);

    let app = Rc::new_cyclic(|this: &Weak<WebApp>| {
        let this = this.clone();
        let dispatch: Dispatch = Rc::new(move |intent: Intent| {
            let Some(app) = this.upgrade() else {
                log::warn!("Dropping {intent:?}: app is gone");
                return;
            };
            wasm_bindgen_futures::spawn_local(async move { app.perform(intent).await });
        });
        App::new(resources, DomMount::new(document, container, dispatch))
    });

    Ok(launch(&RUNNING, app).await)
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub fn start() {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = boot(AppConfig::default()).await {
            log::error!("Failed to start: {e}");
        }
    });
}

/// Boot with a JSON config, e.g. `{"api": {"cohort": "2601-demo"}, "mountSelector": "#root"}`.
/// Missing fields keep their defaults.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub async fn boot_with_config(config_json: String) -> Result<(), JsValue> {
    let config = AppConfig::from_json(&config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;
    boot(config)
        .await
        .map(drop)
        .inspect_err(|e| log::error!("Failed to start: {e}"))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn get_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
