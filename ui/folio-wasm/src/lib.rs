//! Portfolio page WASM frontend.
//!
//! Binds the static page's DOM to the `folio-view` state machines. Each
//! concern (navigation, theme, editing, reveal effects, uploads, device
//! adaptation) lives in its own module; `state::Ctx` is the only shared handle.

pub mod api;
pub mod device;
pub mod dom;
pub mod edit;
pub mod effects;
pub mod events;
pub mod logging;
pub mod nav;
pub mod notify;
pub mod reveal;
pub mod state;
pub mod theme;
pub mod upload;

use folio_view::{Environment, Portfolio, SiteConfig};
use tracing::info;
use wasm_bindgen::prelude::*;

/// WASM entry point, called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let inline = dom::by_id("site-config").and_then(|el| el.text_content());
    let config = SiteConfig::from_inline(inline.as_deref());
    let env = Environment {
        system_scheme: theme::system_scheme(),
        local_hour: theme::local_hour(),
        device: device::signals(),
    };

    let els = dom::Elements::bind()?;
    let github_user = config.github_user.clone();
    let app = Portfolio::load(config, state::BrowserStore, &env);
    let ctx = state::Ctx::new(els, app);

    // Initial render from restored state
    theme::apply_theme(&ctx, ctx.with(|app| app.theme()));
    device::render_flags(&ctx);
    edit::render_values(&ctx);
    upload::render_profile_image(&ctx);
    nav::refresh(&ctx);

    reveal::init(&ctx);
    events::bind_events(&ctx);

    wasm_bindgen_futures::spawn_local(device::watch_battery(ctx.clone()));

    if let Some(user) = github_user {
        let ctx2 = ctx.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let stats = api::load_stats(&user).await;
            ctx2.with_mut(|app| app.set_stats(stats));
            reveal::refresh_stat_counters(&ctx2);
        });
    }

    info!("portfolio page ready");
    Ok(())
}
