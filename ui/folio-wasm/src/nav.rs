//! Navigation rendering: mobile menu, active link, navbar style, back-to-top,
//! parallax. All state comes from `Portfolio`; these functions only write
//! classes and styles.

use crate::dom;
use crate::state::Ctx;
use folio_view::nav::MenuEvent;
use folio_view::scroll::ScrollView;
use gloo_timers::callback::Timeout;

pub fn render_menu(ctx: &Ctx) {
    let open = ctx.with(|app| app.nav().menu().is_open());
    if let Some(h) = &ctx.els.hamburger {
        dom::toggle_class(h, "active", open);
    }
    if let Some(m) = &ctx.els.nav_menu {
        dom::toggle_class(m, "active", open);
    }
    dom::toggle_class(&ctx.els.body, "menu-open", open);
}

pub fn render_active_link(ctx: &Ctx) {
    let active = ctx.with(|app| app.nav().active_link().map(str::to_owned));
    for link in &ctx.els.nav_links {
        let is_active = match (&active, link.get_attribute("href")) {
            (Some(id), Some(href)) => href.strip_prefix('#') == Some(id.as_str()),
            _ => false,
        };
        dom::toggle_class(link, "active", is_active);
    }
}

pub fn render_scroll(ctx: &Ctx, view: &ScrollView) {
    if let Some(navbar) = &ctx.els.navbar {
        dom::toggle_class(navbar, "scrolled", view.scrolled);
    }
    if let Some(btn) = &ctx.els.back_to_top {
        dom::toggle_class(btn, "visible", view.show_back_to_top);
    }
    if let Some(hero) = &ctx.els.hero {
        let offset = ctx.with(|app| app.parallax_offset(view.scroll_y));
        if let Some(offset) = offset {
            dom::set_style(hero, "background-position-y", &format!("{}px", offset));
        }
    }
    render_active_link(ctx);
}

pub fn menu_event(ctx: &Ctx, event: MenuEvent) {
    if ctx.with_mut(|app| app.menu_event(event)) {
        render_menu(ctx);
    }
}

/// Re-measure sections and render the current scroll position immediately.
pub fn refresh(ctx: &Ctx) {
    let sections = ctx.els.measure_sections();
    let view = ctx.with_mut(|app| {
        app.set_sections(sections);
        app.sample_scroll(dom::scroll_y())
    });
    render_scroll(ctx, &view);
}

pub fn on_scroll(ctx: &Ctx) {
    let Some(timer) = ctx.with_mut(|app| app.push_scroll(dom::scroll_y())) else {
        return;
    };
    let ctx2 = ctx.clone();
    Timeout::new(timer.delay_ms, move || {
        // Sections move without a resize (edit inputs, late images).
        let els = &ctx2.els;
        let view = ctx2.with_mut(|app| app.fire_scroll(timer.ticket, || els.measure_sections()));
        if let Some(view) = view {
            render_scroll(&ctx2, &view);
        }
    })
    .forget();
}

pub fn on_resize(ctx: &Ctx) {
    let Some(timer) = ctx.with_mut(|app| app.push_resize(dom::viewport_width())) else {
        return;
    };
    let ctx2 = ctx.clone();
    Timeout::new(timer.delay_ms, move || {
        if ctx2.with_mut(|app| app.fire_resize(timer.ticket)) {
            render_menu(&ctx2);
        }
        refresh(&ctx2);
    })
    .forget();
}

/// Nav link click: close the menu, highlight the link, smooth-scroll.
pub fn on_link_click(ctx: &Ctx, section_id: &str) {
    let sections = ctx.els.measure_sections();
    let target = ctx.with_mut(|app| {
        app.set_sections(sections);
        app.click_nav_link(section_id)
    });
    let Some(top) = target else {
        return;
    };
    render_menu(ctx);
    render_active_link(ctx);
    dom::smooth_scroll_to(top);
}

/// Document click: close the menu if the click landed outside it.
pub fn on_document_click(ctx: &Ctx, target: Option<web_sys::Node>) {
    if !ctx.with(|app| app.nav().menu().is_open()) {
        return;
    }
    let inside = |el: &Option<web_sys::Element>| match (el, &target) {
        (Some(el), Some(t)) => el.contains(Some(t)),
        _ => false,
    };
    if inside(&ctx.els.nav_menu) || inside(&ctx.els.hamburger) {
        return;
    }
    menu_event(ctx, MenuEvent::OutsideClick);
}
