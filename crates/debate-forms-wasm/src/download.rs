//! Client-side file download through a Blob URL and a temporary anchor

use debate_forms::{ExportFile, FileSink};
use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

#[derive(Debug, Default)]
pub struct BlobDownload;

impl FileSink for BlobDownload {
    fn save_file(&mut self, file: &ExportFile) -> Result<(), String> {
        download(file).map_err(|err| {
            err.as_string()
                .unwrap_or_else(|| format!("download failed: {:?}", err))
        })
    }
}

fn download(file: &ExportFile) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no document body"))?;

    let parts = Array::of1(&JsValue::from_str(&file.content));
    let options = BlobPropertyBag::new();
    options.set_type(file.mime_type);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(&url);
    link.set_download(&file.file_name);
    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;

    Url::revoke_object_url(&url)
}
