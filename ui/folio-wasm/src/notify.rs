//! Toast rendering and auto-dismiss timers.

use crate::dom;
use crate::state::Ctx;
use folio_types::NotificationKind;
use folio_view::notify::Notification;
use gloo_timers::callback::Timeout;

/// Queue a message and show it.
pub fn notify(ctx: &Ctx, text: &str, kind: NotificationKind) {
    let notification = ctx.with_mut(|app| app.notify(text, kind));
    show(ctx, &notification);
}

/// Render a notification the state has already queued.
pub fn show(ctx: &Ctx, notification: &Notification) {
    let id = notification.id;
    let el = match dom::create_element("div") {
        Some(el) if ctx.els.body.append_child(&el).is_ok() => el,
        _ => {
            ctx.with_mut(|app| app.notifications().remove(id));
            return;
        }
    };
    el.set_id(&notification.dom_id());
    el.set_class_name(&notification.class_name());
    el.set_text_content(Some(&notification.text));

    let (visible_ms, fade_ms) = ctx.with_mut(|app| {
        let center = app.notifications();
        (center.visible_ms(), center.fade_ms())
    });
    let ctx2 = ctx.clone();
    Timeout::new(visible_ms, move || {
        if !ctx2.with_mut(|app| app.notifications().begin_hide(id)) {
            return;
        }
        if dom::is_attached(&el) {
            dom::add_class(&el, "hide");
        }
        Timeout::new(fade_ms, move || {
            ctx2.with_mut(|app| app.notifications().remove(id));
            if dom::is_attached(&el) {
                el.remove();
            }
        })
        .forget();
    })
    .forget();
}
