//! Button ripple.

use crate::dom;
use crate::state::Ctx;
use gloo_timers::callback::Timeout;
use web_sys::{Element, MouseEvent};

pub fn ripple(ctx: &Ctx, button: &Element, event: &MouseEvent) {
    let Some(span) = dom::create_element("span") else {
        return;
    };
    let rect = button.get_bounding_client_rect();
    let size = rect.width().max(rect.height());
    let left = event.client_x() as f64 - rect.left() - size / 2.0;
    let top = event.client_y() as f64 - rect.top() - size / 2.0;

    span.set_class_name("ripple");
    dom::set_style(&span, "width", &format!("{}px", size));
    dom::set_style(&span, "height", &format!("{}px", size));
    dom::set_style(&span, "left", &format!("{}px", left));
    dom::set_style(&span, "top", &format!("{}px", top));
    if button.append_child(&span).is_err() {
        return;
    }

    let ripple_ms = ctx.with(|app| app.config().ripple_ms);
    Timeout::new(ripple_ms, move || {
        if dom::is_attached(&span) {
            span.remove();
        }
    })
    .forget();
}
