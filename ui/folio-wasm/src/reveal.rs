//! Scroll reveal wiring: one `IntersectionObserver` per element group, effects
//! rendered on first intersection.

use crate::dom;
use crate::state::Ctx;
use folio_view::reveal::{
    CounterAnimation, RevealEffect, RevealGroup, WatchSpec, parse_percent,
};
use folio_view::typewriter::Typewriter;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

fn watch_spec(group: RevealGroup, el: &Element, index: usize, ctx: &Ctx) -> Option<WatchSpec> {
    Some(match group {
        RevealGroup::Fade => WatchSpec::Fade,
        RevealGroup::SkillBar => {
            let raw = el
                .get_attribute("data-progress")
                .or_else(|| el.get_attribute("data-width"))?;
            WatchSpec::SkillBar {
                percent: parse_percent(&raw)?,
                index,
            }
        }
        RevealGroup::Counter => WatchSpec::Counter {
            target: counter_target(ctx, el)?,
        },
        RevealGroup::Typewriter => WatchSpec::Typewriter,
    })
}

/// `data-stat` counters follow the (possibly fetched) statistics; others use
/// their static `data-target`.
fn counter_target(ctx: &Ctx, el: &Element) -> Option<u64> {
    if let Some(key) = el.get_attribute("data-stat") {
        return ctx.with(|app| app.stats().get(&key));
    }
    el.get_attribute("data-target")?.trim().parse().ok()
}

/// Start observing every element of every group.
pub fn init(ctx: &Ctx) {
    let mut next_id = 0usize;
    for group in RevealGroup::ALL {
        let elements = dom::query_all(group.selector());
        if elements.is_empty() {
            continue;
        }
        let Some(observer) = observer_for(ctx, group) else {
            continue;
        };
        for (index, el) in elements.iter().enumerate() {
            if el.id().is_empty() {
                el.set_id(&format!("reveal-{}", next_id));
                next_id += 1;
            }
            let Some(spec) = watch_spec(group, el, index, ctx) else {
                continue;
            };
            if ctx.with_mut(|app| app.reveal_mut().watch(el.id(), spec)) {
                observer.observe(el);
            }
        }
    }
}

fn observer_for(ctx: &Ctx, group: RevealGroup) -> Option<IntersectionObserver> {
    let options = group.observer_options();
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(options.root_margin);

    let ctx2 = ctx.clone();
    let cb = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let effect = ctx2.with_mut(|app| {
                    app.reveal_mut()
                        .on_intersect(&target.id(), entry.is_intersecting())
                });
                if let Some(effect) = effect {
                    observer.unobserve(&target);
                    apply_effect(&ctx2, &target, effect);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let observer =
        IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init).ok()?;
    cb.forget();
    Some(observer)
}

fn apply_effect(ctx: &Ctx, el: &Element, effect: RevealEffect) {
    debug!(id = %el.id(), ?effect, "reveal");
    match effect {
        RevealEffect::FadeIn => dom::add_class(el, "animate-in"),
        RevealEffect::FillSkill { percent, delay_ms } => {
            let el = el.clone();
            Timeout::new(delay_ms, move || {
                if dom::is_attached(&el) {
                    dom::set_style(&el, "width", &format!("{}%", percent));
                    dom::add_class(&el, "animate-in");
                }
            })
            .forget();
        }
        RevealEffect::Count { target } => {
            // Statistics may have arrived since the element was registered.
            let target = counter_target(ctx, el).unwrap_or(target);
            let (duration, tick) = ctx.with(|app| {
                (app.config().counter_duration_ms, app.config().counter_tick_ms)
            });
            run_counter(
                el.clone(),
                CounterAnimation::new(target, duration),
                tick.max(1),
                js_sys::Date::now(),
            );
        }
        RevealEffect::StartTypewriter => start_typewriter(ctx, el),
    }
}

fn run_counter(el: Element, counter: CounterAnimation, tick_ms: u32, started: f64) {
    if !dom::is_attached(&el) {
        return;
    }
    let elapsed = (js_sys::Date::now() - started).max(0.0) as u32;
    el.set_text_content(Some(&counter.value_at(elapsed).to_string()));
    if counter.is_done(elapsed) {
        return;
    }
    Timeout::new(tick_ms, move || run_counter(el, counter, tick_ms, started)).forget();
}

/// Counters already animated when fresh statistics arrive jump to the new value.
pub fn refresh_stat_counters(ctx: &Ctx) {
    for el in dom::query_all("[data-stat]") {
        let Some(key) = el.get_attribute("data-stat") else {
            continue;
        };
        let triggered = ctx.with(|app| app.reveal().is_triggered(&el.id()));
        if !triggered {
            continue;
        }
        if let Some(value) = ctx.with(|app| app.stats().get(&key)) {
            el.set_text_content(Some(&value.to_string()));
        }
    }
}

// ── Typewriter ──

fn start_typewriter(ctx: &Ctx, el: &Element) {
    let (writer, animated) = ctx.with(|app| {
        (
            Typewriter::new(&app.config().typewriter),
            app.flags().animations_enabled(),
        )
    });
    let Some(writer) = writer else {
        return;
    };
    let writer = Rc::new(RefCell::new(writer));
    if animated {
        tick_typewriter(ctx.clone(), el.clone(), writer);
    } else {
        pause_typewriter(ctx, el.clone(), writer);
    }
}

/// Freeze on a complete phrase until animations are allowed again.
fn pause_typewriter(ctx: &Ctx, el: Element, writer: Rc<RefCell<Typewriter>>) {
    let text = writer.borrow_mut().settle();
    el.set_text_content(Some(&text));
    ctx.typewriter_timer.set(None);
    *ctx.typewriter_paused.borrow_mut() = Some((el, writer));
}

/// Restart a typewriter frozen by power saving. No-op if none is paused.
pub fn resume_typewriter(ctx: &Ctx) {
    if !ctx.with(|app| app.flags().animations_enabled()) {
        return;
    }
    let paused = ctx.typewriter_paused.borrow_mut().take();
    if let Some((el, writer)) = paused {
        debug!("resuming typewriter");
        tick_typewriter(ctx.clone(), el, writer);
    }
}

fn tick_typewriter(ctx: Ctx, el: Element, writer: Rc<RefCell<Typewriter>>) {
    if ctx.typewriter_stopped.get() || !dom::is_attached(&el) {
        ctx.typewriter_timer.set(None);
        return;
    }
    if !ctx.with(|app| app.flags().animations_enabled()) {
        pause_typewriter(&ctx, el, writer);
        return;
    }
    let frame = writer.borrow_mut().tick();
    el.set_text_content(Some(&frame.text));

    let ctx2 = ctx.clone();
    let handle = Timeout::new(frame.delay_ms, move || tick_typewriter(ctx2, el, writer)).forget();
    ctx.typewriter_timer.set(handle.as_f64().map(|id| id as i32));
}

/// Page teardown: cancel the pending typewriter step.
pub fn stop_typewriter(ctx: &Ctx) {
    ctx.typewriter_stopped.set(true);
    if let Some(id) = ctx.typewriter_timer.take() {
        dom::window().clear_timeout_with_handle(id);
    }
}
