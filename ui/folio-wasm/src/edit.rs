//! Inline editing of `[data-field]` elements.
//!
//! Edit mode swaps every field's text for an `<input>` (or `<textarea>` for
//! long-form fields); save reads them all back and restores plain text.

use crate::dom;
use crate::notify;
use crate::state::Ctx;
use folio_types::FieldName;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

fn field_of(el: &Element) -> Option<FieldName> {
    let raw = el.get_attribute("data-field")?;
    match raw.parse::<FieldName>() {
        Ok(field) => Some(field),
        Err(err) => {
            warn!(error = %err, "skipping editable element");
            None
        }
    }
}

fn editor_input(el: &HtmlElement) -> Option<Element> {
    el.query_selector(".edit-input").ok().flatten()
}

fn input_value(input: &Element) -> String {
    if let Some(i) = input.dyn_ref::<HtmlInputElement>() {
        i.value()
    } else if let Some(t) = input.dyn_ref::<HtmlTextAreaElement>() {
        t.value()
    } else {
        String::new()
    }
}

fn set_input_value(input: &Element, value: &str) {
    if let Some(i) = input.dyn_ref::<HtmlInputElement>() {
        i.set_value(value);
    } else if let Some(t) = input.dyn_ref::<HtmlTextAreaElement>() {
        t.set_value(value);
    }
}

fn focus(input: &Element) {
    if let Some(html) = input.dyn_ref::<HtmlElement>() {
        let _ = html.focus();
    }
}

fn input_for(ctx: &Ctx, field: FieldName) -> Option<Element> {
    ctx.els
        .editable
        .iter()
        .find(|el| field_of(el) == Some(field))
        .and_then(editor_input)
}

fn render_buttons(ctx: &Ctx, editing: bool) {
    if let Some(btn) = &ctx.els.edit_btn {
        dom::toggle_class(btn, "hidden", editing);
    }
    if let Some(btn) = &ctx.els.save_btn {
        dom::toggle_class(btn, "hidden", !editing);
    }
    dom::toggle_class(&ctx.els.body, "editing", editing);
}

/// Write the current values into every field as plain text.
pub fn render_values(ctx: &Ctx) {
    for el in &ctx.els.editable {
        let Some(field) = field_of(el) else {
            continue;
        };
        let text = ctx.with(|app| app.editor().value(field).to_owned());
        el.set_text_content(Some(&text));
    }
}

pub fn enable_editing(ctx: &Ctx) {
    let Some(notification) = ctx.with_mut(|app| app.enable_editing()) else {
        return;
    };

    let mut first: Option<Element> = None;
    for el in &ctx.els.editable {
        let Some(field) = field_of(el) else {
            continue;
        };
        let tag = if field.is_long_form() { "textarea" } else { "input" };
        let Some(input) = dom::create_element(tag) else {
            continue;
        };
        let text = ctx.with(|app| app.editor().value(field).to_owned());
        input.set_class_name("edit-input");
        let _ = input.set_attribute("data-field", field.as_str());
        set_input_value(&input, &text);

        el.set_text_content(None);
        if el.append_child(&input).is_err() {
            continue;
        }
        first.get_or_insert(input);
    }

    render_buttons(ctx, true);
    if let Some(input) = first {
        focus(&input);
    }
    notify::show(ctx, &notification);
}

/// The target of an event bubbling out of a field's `.edit-input`.
fn event_input(e: &web_sys::Event) -> Option<Element> {
    let target = e.target()?.dyn_into::<Element>().ok()?;
    target.class_list().contains("edit-input").then_some(target)
}

/// Listen on the `[data-field]` containers once. Edit inputs are recreated on
/// every session; their `input`/`keydown` events bubble up to these handlers.
pub fn bind_fields(ctx: &Ctx) {
    for el in &ctx.els.editable {
        let Some(field) = field_of(el) else {
            continue;
        };
        {
            let ctx2 = ctx.clone();
            let cb = Closure::wrap(Box::new(move |e: web_sys::Event| {
                if let Some(input) = event_input(&e) {
                    let value = input_value(&input);
                    ctx2.with_mut(|app| app.set_draft(field, value));
                }
            }) as Box<dyn FnMut(_)>);
            let _ = el.add_event_listener_with_callback("input", cb.as_ref().unchecked_ref());
            cb.forget();
        }
        {
            let ctx2 = ctx.clone();
            let cb = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                let Some(input) = event_input(&e) else {
                    return;
                };
                on_field_key(&ctx2, &input, field, &e);
            }) as Box<dyn FnMut(_)>);
            let _ = el.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
            cb.forget();
        }
    }
}

fn on_field_key(ctx: &Ctx, input: &Element, field: FieldName, e: &web_sys::KeyboardEvent) {
    match e.key().as_str() {
        "Enter" if !field.is_long_form() => {
            e.prevent_default();
            let next = ctx.with(|app| app.confirm_field(field));
            match next.and_then(|f| input_for(ctx, f)) {
                Some(next_input) => focus(&next_input),
                None => {
                    if let Some(html) = input.dyn_ref::<HtmlElement>() {
                        let _ = html.blur();
                    }
                }
            }
        }
        "Escape" => {
            e.stop_propagation();
            if let Some(original) = ctx.with_mut(|app| app.revert_field(field)) {
                set_input_value(input, &original);
            }
        }
        _ => {}
    }
}

pub fn save_changes(ctx: &Ctx) {
    if !ctx.with(|app| app.editor().is_editing()) {
        return;
    }
    for el in &ctx.els.editable {
        let (Some(field), Some(input)) = (field_of(el), editor_input(el)) else {
            continue;
        };
        let value = input_value(&input);
        ctx.with_mut(|app| app.set_draft(field, value));
    }

    let Some((_outcome, notification)) = ctx.with_mut(|app| app.save_changes()) else {
        return;
    };
    render_values(ctx);
    render_buttons(ctx, false);
    notify::show(ctx, &notification);
}
