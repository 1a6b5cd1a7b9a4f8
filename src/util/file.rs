//! Browser file-picker glue for the create-post form.

use wasm_bindgen::JsCast;

use crate::state::compose::SelectedImage;

/// First file chosen in the `<input type="file">` that fired `ev`.
pub fn selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Object URL for an in-page preview of `file`.
pub fn preview_url(file: &web_sys::File) -> Option<String> {
    web_sys::Url::create_object_url_with_blob(file).ok()
}

/// Release a URL created by [`preview_url`].
pub fn revoke_preview(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

/// Read the whole file into memory.
///
/// # Errors
///
/// Returns the browser's error text when the read fails.
pub async fn read_image(file: &web_sys::File) -> Result<SelectedImage, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("{e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(SelectedImage::new(file.name(), file.type_(), bytes))
}
