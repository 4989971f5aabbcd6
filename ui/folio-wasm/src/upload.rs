//! Profile image upload from `#profile-upload`.

use crate::notify;
use crate::state::Ctx;
use js_sys::Uint8Array;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

/// Show the persisted image, if one was loaded.
pub fn render_profile_image(ctx: &Ctx) {
    let (Some(img), Some(uri)) = (
        &ctx.els.profile_img,
        ctx.with(|app| app.profile_image().cloned()),
    ) else {
        return;
    };
    img.set_src(uri.as_str());
}

async fn read_bytes(file: &File) -> Result<Vec<u8>, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

pub async fn on_file_selected(ctx: Ctx) {
    let Some(input) = ctx.els.profile_input.clone() else {
        return;
    };
    let Some(file) = input.files().and_then(|list| list.get(0)) else {
        return;
    };
    // Allow re-selecting the same file.
    input.set_value("");

    let mime = file.type_();
    if let Err(notification) = ctx.with_mut(|app| app.check_upload(&mime, file.size() as u64)) {
        notify::show(&ctx, &notification);
        return;
    }

    let bytes = match read_bytes(&file).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(error = ?err, "failed to read selected file");
            notify::notify(
                &ctx,
                "Không thể đọc tệp đã chọn",
                folio_types::NotificationKind::Error,
            );
            return;
        }
    };

    match ctx.with_mut(|app| app.store_profile_image(&mime, &bytes)) {
        Ok((uri, notification)) => {
            if let Some(img) = &ctx.els.profile_img {
                img.set_src(uri.as_str());
            }
            notify::show(&ctx, &notification);
        }
        Err(notification) => notify::show(&ctx, &notification),
    }
}

pub fn bind(ctx: &Ctx) {
    let Some(input) = &ctx.els.profile_input else {
        return;
    };
    let ctx2 = ctx.clone();
    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
        wasm_bindgen_futures::spawn_local(on_file_selected(ctx2.clone()));
    }) as Box<dyn FnMut(_)>);
    let _ = input.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
    cb.forget();
}
