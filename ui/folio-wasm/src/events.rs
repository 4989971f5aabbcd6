//! Event binding.
//!
//! Wires every page listener to the matching render module. Handlers that
//! need to await (file reads) are spawned via `wasm_bindgen_futures::spawn_local`.

use crate::dom;
use crate::edit;
use crate::effects;
use crate::nav;
use crate::reveal;
use crate::state::Ctx;
use crate::theme;
use crate::upload;
use folio_view::nav::MenuEvent;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, KeyboardEvent, MouseEvent};

/// Attach a listener; a failing `addEventListener` just leaves the feature off.
macro_rules! on {
    ($target:expr, $event:expr, $ty:ty, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut($ty)>);
        let target: &EventTarget = $target.as_ref();
        let _ = target.add_event_listener_with_callback($event, cb.as_ref().unchecked_ref());
        cb.forget();
    }};
}

/// Bind all page listeners. Call once after init.
pub fn bind_events(ctx: &Ctx) {
    let window = dom::window();
    let document = dom::document();

    // ── Navigation ──
    if let Some(hamburger) = &ctx.els.hamburger {
        let ctx2 = ctx.clone();
        on!(hamburger, "click", MouseEvent, move |e: MouseEvent| {
            e.stop_propagation();
            nav::menu_event(&ctx2, MenuEvent::HamburgerClick);
        });
    }
    {
        let ctx2 = ctx.clone();
        on!(document, "click", MouseEvent, move |e: MouseEvent| {
            let target = e.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
            nav::on_document_click(&ctx2, target);
        });
    }
    {
        let ctx2 = ctx.clone();
        on!(document, "keydown", KeyboardEvent, move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                nav::menu_event(&ctx2, MenuEvent::Escape);
            }
        });
    }
    for link in &ctx.els.nav_links {
        let Some(id) = link
            .get_attribute("href")
            .and_then(|href| href.strip_prefix('#').map(str::to_owned))
        else {
            continue;
        };
        let ctx2 = ctx.clone();
        on!(link, "click", MouseEvent, move |e: MouseEvent| {
            e.prevent_default();
            nav::on_link_click(&ctx2, &id);
        });
    }
    if let Some(btn) = &ctx.els.back_to_top {
        on!(btn, "click", MouseEvent, move |e: MouseEvent| {
            e.prevent_default();
            dom::smooth_scroll_to(0.0);
        });
    }

    // ── Window ──
    {
        let ctx2 = ctx.clone();
        on!(window, "scroll", web_sys::Event, move |_: web_sys::Event| {
            nav::on_scroll(&ctx2);
        });
    }
    {
        let ctx2 = ctx.clone();
        on!(window, "resize", web_sys::Event, move |_: web_sys::Event| {
            nav::on_resize(&ctx2);
        });
    }
    {
        let ctx2 = ctx.clone();
        on!(window, "orientationchange", web_sys::Event, move |_: web_sys::Event| {
            nav::menu_event(&ctx2, MenuEvent::OrientationChange);
        });
    }
    {
        let ctx2 = ctx.clone();
        on!(window, "pagehide", web_sys::Event, move |_: web_sys::Event| {
            reveal::stop_typewriter(&ctx2);
        });
    }

    // ── Theme ──
    if let Some(toggle) = &ctx.els.theme_toggle {
        let ctx2 = ctx.clone();
        on!(toggle, "click", MouseEvent, move |_: MouseEvent| {
            theme::on_toggle(&ctx2);
        });
    }
    theme::bind_system_listener(ctx);

    // ── Inline editing ──
    edit::bind_fields(ctx);
    if let Some(btn) = &ctx.els.edit_btn {
        let ctx2 = ctx.clone();
        on!(btn, "click", MouseEvent, move |_: MouseEvent| {
            edit::enable_editing(&ctx2);
        });
    }
    if let Some(btn) = &ctx.els.save_btn {
        let ctx2 = ctx.clone();
        on!(btn, "click", MouseEvent, move |_: MouseEvent| {
            edit::save_changes(&ctx2);
        });
    }

    // ── Profile image ──
    upload::bind(ctx);

    // ── Ripple ──
    for button in dom::query_all(".btn") {
        let ctx2 = ctx.clone();
        let button2 = button.clone();
        on!(button, "click", MouseEvent, move |e: MouseEvent| {
            effects::ripple(&ctx2, &button2, &e);
        });
    }
}
