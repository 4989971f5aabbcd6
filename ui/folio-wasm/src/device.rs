//! Device capability probing: CPU cores, Network Information API and the
//! Battery Status API. Missing APIs leave the matching signal empty.

use crate::dom;
use crate::reveal;
use crate::state::Ctx;
use folio_view::device::{BatteryStatus, ConnectionInfo, DeviceSignals};
use js_sys::{Function, Promise, Reflect};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

fn navigator_prop(name: &str) -> Option<JsValue> {
    let value = Reflect::get(&dom::window().navigator(), &JsValue::from_str(name)).ok()?;
    (!value.is_undefined() && !value.is_null()).then_some(value)
}

fn connection() -> Option<ConnectionInfo> {
    let raw = navigator_prop("connection")?;
    match serde_wasm_bindgen::from_value::<ConnectionInfo>(raw) {
        Ok(info) => Some(info),
        Err(err) => {
            debug!(error = %err, "unreadable navigator.connection");
            None
        }
    }
}

/// Synchronous signals available before the page state is built.
pub fn signals() -> DeviceSignals {
    let cores = dom::window().navigator().hardware_concurrency();
    DeviceSignals {
        cores: (cores > 0.0).then_some(cores as u32),
        connection: connection(),
        battery: None,
    }
}

pub fn render_flags(ctx: &Ctx) {
    let flags = ctx.with(|app| app.flags());
    let body = &ctx.els.body;
    dom::toggle_class(body, "reduced-motion", flags.reduced_motion);
    dom::toggle_class(body, "low-bandwidth", flags.hide_decorations);
    dom::toggle_class(body, "power-saving", flags.power_saving);
}

fn battery_status(battery: &JsValue) -> Option<BatteryStatus> {
    let level = Reflect::get(battery, &JsValue::from_str("level")).ok()?.as_f64()?;
    let charging = Reflect::get(battery, &JsValue::from_str("charging"))
        .ok()?
        .as_bool()?;
    Some(BatteryStatus { level, charging })
}

fn on_battery_change(ctx: &Ctx, battery: &JsValue) {
    let Some(status) = battery_status(battery) else {
        return;
    };
    if ctx.with_mut(|app| app.update_battery(status)) {
        info!(level = status.level, charging = status.charging, "power saving changed");
        render_flags(ctx);
        reveal::resume_typewriter(ctx);
    }
}

/// Read the battery once and follow its level/charging events.
pub async fn watch_battery(ctx: Ctx) {
    let Some(get_battery) = navigator_prop("getBattery").and_then(|f| f.dyn_into::<Function>().ok())
    else {
        return;
    };
    let Ok(promise) = get_battery
        .call0(&dom::window().navigator())
        .and_then(|p| p.dyn_into::<Promise>())
    else {
        return;
    };
    let battery = match JsFuture::from(promise).await {
        Ok(battery) => battery,
        Err(err) => {
            debug!(error = ?err, "battery status unavailable");
            return;
        }
    };

    on_battery_change(&ctx, &battery);

    let target: &web_sys::EventTarget = battery.unchecked_ref();
    for event in ["levelchange", "chargingchange"] {
        let ctx2 = ctx.clone();
        let battery2 = battery.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            on_battery_change(&ctx2, &battery2);
        }) as Box<dyn FnMut(_)>);
        let _ = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
        cb.forget();
    }
}
