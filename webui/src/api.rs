use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use crate::types::*;

pub const BASE: &str = ""; // use same-origin relative URLs

fn url(path: &str) -> String { format!("{}{}", BASE, path) }

fn map_net(e: reqwasm::Error) -> String { format!("Network error: {}", e) }

// Prefer the backend's error message over the raw body
async fn error_text(resp: reqwasm::http::Response) -> String {
    let text = resp.text().await.unwrap_or_else(|_| "HTTP error".into());
    if let Ok(v) = serde_json::from_str::<JsonValue>(&text) {
        if let Some(msg) = v.pointer("/error/details/message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = v.pointer("/error/message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }
    text
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let resp = reqwasm::http::Request::get(&url(path)).send().await.map_err(map_net)?;
    if !resp.ok() { return Err(error_text(resp).await); }
    resp.json().await.map_err(map_net)
}

async fn send_json<B: Serialize, T: DeserializeOwned>(method: reqwasm::http::Method, path: &str, body: &B) -> Result<T, String> {
    let body = serde_json::to_string(body).map_err(|e| e.to_string())?;
    let resp = reqwasm::http::Request::new(&url(path))
        .method(method)
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await
        .map_err(map_net)?;
    if !resp.ok() { return Err(error_text(resp).await); }
    resp.json().await.map_err(map_net)
}

pub async fn get_page() -> Result<PageView, String> {
    get_json("/api/libraries/page").await
}

pub async fn collection_types() -> Result<Vec<CollectionTypeOption>, String> {
    get_json("/api/libraries/collection-types").await
}

pub async fn move_library(name: &str, direction: MoveDirection) -> Result<LibraryOrder, String> {
    let req = MoveLibraryRequest { name: name.to_string(), direction };
    send_json(reqwasm::http::Method::POST, "/api/libraries/order/move", &req).await
}

pub async fn scan_all() -> Result<ScanOutcome, String> {
    send_json(reqwasm::http::Method::POST, "/api/libraries/scan", &serde_json::json!({})).await
}

pub async fn create_library(req: &CreateLibraryRequest) -> Result<CreateLibraryResponse, String> {
    send_json(reqwasm::http::Method::POST, "/api/libraries", req).await
}

// SSE helper: open EventSource and wire message callback. Returns the EventSource to be kept alive.
pub fn sse_attach<F>(mut on_message: F) -> Result<EventSource, String>
where F: 'static + FnMut(RefreshTaskEvent) {
    let es = EventSource::new(&url("/api/tasks/refresh/events")).map_err(|e| format!("SSE error: {:?}", e))?;
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        if let Ok(me) = ev.dyn_into::<MessageEvent>() {
            if let Some(text) = me.data().as_string() {
                if let Ok(ev) = serde_json::from_str::<RefreshTaskEvent>(&text) {
                    on_message(ev);
                }
            }
        }
    });
    es.set_onmessage(Some(closure.as_ref().unchecked_ref()));
    // Leak the closure to keep it as long as the EventSource lives (we close ES on drop by the owner)
    closure.forget();
    Ok(es)
}
