use shared::repository::API_TODOS_PATH;
use shared::{ApiRequest, RawResponse, RemoteStore, TodoError};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Request, RequestInit, Response};

/// `fetch`-backed transport for the todos resource.
#[derive(Debug, Clone)]
pub struct HttpStore {
    base: String,
}

impl Default for HttpStore {
    fn default() -> Self {
        Self::new(API_TODOS_PATH)
    }
}

impl HttpStore {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl RemoteStore for HttpStore {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TodoError> {
        let url = request.url(&self.base);
        let body = request.body()?;

        let opts = RequestInit::new();
        opts.set_method(request.method());
        if let Some(body) = &body {
            opts.set_body(&JsValue::from_str(body));
        }

        let http_request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        if body.is_some() {
            http_request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(js_error)?;
        }

        let promise = window()
            .ok_or_else(|| TodoError::Network("no window available".to_string()))?
            .fetch_with_request(&http_request);

        let response: Response = JsFuture::from(promise).await.map_err(js_error)?.into();
        let status = response.status();

        let text_promise = response.text().map_err(js_error)?;
        let body = JsFuture::from(text_promise)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        log::debug!("{} {} -> {}", request.method(), url, status);
        Ok(RawResponse { status, body })
    }
}

fn js_error(value: JsValue) -> TodoError {
    TodoError::Network(format!("{:?}", value))
}
