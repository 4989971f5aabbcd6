//! Theme rendering.
//!
//! The active theme is written to `<html data-theme>` and the toggle icon is
//! swapped between moon and sun. The system preference is read through
//! `matchMedia` at startup and followed live until the visitor chooses.

use crate::dom;
use crate::notify;
use crate::state::Ctx;
use folio_types::Theme;
use folio_view::theme::SystemScheme;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";
const LIGHT_QUERY: &str = "(prefers-color-scheme: light)";

fn media_query(query: &str) -> Option<web_sys::MediaQueryList> {
    dom::window().match_media(query).ok().flatten()
}

pub fn system_scheme() -> SystemScheme {
    let matches = |q| media_query(q).is_some_and(|m| m.matches());
    SystemScheme::from_flags(matches(DARK_QUERY), matches(LIGHT_QUERY))
}

pub fn local_hour() -> u32 {
    js_sys::Date::new_0().get_hours()
}

pub fn apply_theme(ctx: &Ctx, theme: Theme) {
    let _ = ctx.els.root.set_attribute("data-theme", theme.as_str());
    if let Some(icon) = &ctx.els.theme_icon {
        dom::remove_class(icon, theme.toggled().icon_class());
        dom::add_class(icon, theme.icon_class());
    }
}

pub fn on_toggle(ctx: &Ctx) {
    let (theme, notification) = ctx.with_mut(|app| app.toggle_theme());
    apply_theme(ctx, theme);
    notify::show(ctx, &notification);
}

/// Follow live `prefers-color-scheme` changes.
pub fn bind_system_listener(ctx: &Ctx) {
    let Some(mql) = media_query(DARK_QUERY) else {
        return;
    };
    let ctx2 = ctx.clone();
    let cb = Closure::wrap(Box::new(move |e: web_sys::MediaQueryListEvent| {
        let applied = ctx2.with_mut(|app| app.on_system_scheme_change(e.matches()));
        if let Some(theme) = applied {
            debug!(theme = %theme, "following system color scheme");
            apply_theme(&ctx2, theme);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = mql.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
    cb.forget();
}
