//! One-time asynchronous fetch of the dataset.

use crate::{read_records_from_csv_string, DataError, RecordStore};
use log::info;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

fn js_error(value: JsValue) -> DataError {
    let msg = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    DataError::Fetch(msg)
}

/// GET `url` and return the body as text. Non-2xx statuses are errors.
pub async fn fetch_text(url: &str) -> Result<String, DataError> {
    let window = web_sys::window().ok_or_else(|| DataError::Fetch("no window".to_string()))?;

    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;

    if !response.ok() {
        return Err(DataError::Fetch(format!(
            "{} returned HTTP {}",
            url,
            response.status()
        )));
    }

    let body = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    body.as_string()
        .ok_or_else(|| DataError::Fetch("response body is not text".to_string()))
}

/// Fetch and parse the tournament table.
pub async fn load_dataset(url: &str) -> Result<RecordStore, DataError> {
    info!("Fetching dataset from {}", url);
    let text = fetch_text(url).await?;
    read_records_from_csv_string(&text)
}
