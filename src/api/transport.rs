//! Fetch Transport
//!
//! `Transport` over the browser Fetch API via gloo-net.

use async_trait::async_trait;
use gloo_net::http::{Method, RequestBuilder};

use super::{HttpMethod, HttpRequest, HttpResponse, Transport};

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let mut builder = RequestBuilder::new(&request.url).method(to_method(request.method));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let built = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| e.to_string())?;

        let response = built.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        let body = read_body(response.text().await)?;
        Ok(HttpResponse { status, body })
    }
}

/// A body that cannot be read counts as no response, never as an empty one
fn read_body(text: Result<String, gloo_net::Error>) -> Result<String, String> {
    text.map_err(|e| format!("Could not read response: {}", e))
}
