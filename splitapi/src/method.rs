//! HTTP method conversion for the transport layer.

use splitapi_define::RestMethod;

/// Converts a [`RestMethod`] to the equivalent `reqwest::Method`.
pub fn to_reqwest(method: RestMethod) -> reqwest::Method {
    match method {
        RestMethod::Get => reqwest::Method::GET,
        RestMethod::Post => reqwest::Method::POST,
        RestMethod::Put => reqwest::Method::PUT,
        RestMethod::Patch => reqwest::Method::PATCH,
        RestMethod::Delete => reqwest::Method::DELETE,
        RestMethod::Head => reqwest::Method::HEAD,
        RestMethod::Options => reqwest::Method::OPTIONS,
        RestMethod::Trace => reqwest::Method::TRACE,
    }
}
