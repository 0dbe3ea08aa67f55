//! Transport collaborator: a minimal HTTP abstraction with no built-in retry.
//! Retry and timeout policy belongs to the signing orchestrator and polling engine.

pub mod reqwest_client;

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use itertools::Itertools;
use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::Display;
use thiserror::Error;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    fn post(&self, url: &str) -> RequestBuilder;

    async fn send(
        &self,
        url: &str,
        body: Option<Vec<u8>>,
        headers: Option<Headers>,
        method: Method,
    ) -> Result<Response, Error>;
}

pub type Headers = HashMap<String, String>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StatusCode(pub u16);

#[derive(Clone, Debug)]
pub struct Request {
    pub body: Option<Vec<u8>>,
    pub headers: Headers,
    pub method: Method,
    pub url: String,
    /// Body carries credentials and must not be logged
    pub sensitive: bool,
}

#[derive(Debug)]
pub struct Response {
    pub body: Vec<u8>,
    pub headers: Headers,
    pub status: StatusCode,

    pub request: Request,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    HttpError(String),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Other HTTP client error: {0}")]
    Other(String),
    #[error("HTTP status code is error: {0}")]
    StatusCodeIsError(StatusCode),
}

impl Error {
    fn log_error(self, location: &std::panic::Location, request: &Request) -> Self {
        tracing::error!(
            method = %request.method,
            url = %request.url,
            %location,
            "HTTP request failed: {self}"
        );
        self
    }
}

impl Response {
    #[track_caller]
    pub fn error_for_status(self) -> Result<Self, Error> {
        if self.status.is_success() {
            return Ok(self);
        }

        let location = std::panic::Location::caller();
        let body = if self.request.sensitive {
            "<sensitive response>".to_string()
        } else {
            format_body(Some(&self.body))
        };
        tracing::trace!(%body, %location, "error response body");
        Err(Error::StatusCodeIsError(self.status).log_error(location, &self.request))
    }

    #[track_caller]
    pub fn json<T: DeserializeOwned>(self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(|error| {
            let location = std::panic::Location::caller();
            Error::JsonError(error).log_error(location, &self.request)
        })
    }

    fn log_success(self, location: &std::panic::Location, request: &Request) -> Self {
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status = %self.status,
            %location,
            "HTTP request completed"
        );
        log_request_details(location, request);
        let body = if request.sensitive {
            "<sensitive response>".to_string()
        } else {
            format_body(Some(&self.body))
        };
        tracing::trace!(
            headers = %format_headers(&self.headers),
            %body,
            %location,
            "HTTP response"
        );

        self
    }
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum Method {
    #[strum(serialize = "POST")]
    Post,
}

pub struct RequestBuilder {
    client: Arc<dyn HttpClient>,
    body: Option<Vec<u8>>,
    headers: Headers,
    method: Method,
    url: String,
    sensitive: bool,
}

impl RequestBuilder {
    pub fn new(client: Arc<dyn HttpClient>, method: Method, url: &str) -> Self {
        Self {
            client,
            body: None,
            headers: Headers::default(),
            method,
            url: url.to_string(),
            sensitive: false,
        }
    }

    /// Excludes request and response bodies from logs
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Url-encoded form body, used by the OAuth token endpoint. Form bodies are always sensitive.
    #[track_caller]
    pub fn form<T: Serialize>(mut self, value: T) -> Result<Self, Error> {
        let location = std::panic::Location::caller();

        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_owned(),
        );
        self.sensitive = true;
        self.body = Some(
            serde_urlencoded::to_string(value)
                .map_err(|e| Error::Other(e.to_string()).log_error(location, &self.as_request()))?
                .into_bytes(),
        );
        Ok(self)
    }

    #[track_caller]
    pub fn json<T: Serialize>(mut self, value: T) -> Result<Self, Error> {
        let location = std::panic::Location::caller();

        self.headers
            .insert("Content-Type".to_string(), "application/json".to_owned());
        self.headers
            .insert("Accept".to_string(), "application/json".to_owned());
        self.body = Some(
            serde_json::to_vec(&value)
                .map_err(|e| Error::JsonError(e).log_error(location, &self.as_request()))?,
        );
        Ok(self)
    }

    pub async fn send(self) -> Result<Response, Error> {
        let location = std::panic::Location::caller();
        let request = self.as_request();

        let headers = if self.headers.is_empty() {
            None
        } else {
            Some(self.headers)
        };

        self.client
            .send(&self.url, self.body, headers, self.method)
            .await
            .map(|mut response| {
                response.request.sensitive = request.sensitive;
                response.log_success(location, &request)
            })
            .map_err(|e| {
                let error = e.log_error(location, &request);
                log_request_details(location, &request);
                error
            })
    }

    fn as_request(&self) -> Request {
        Request {
            body: self.body.clone(),
            headers: self.headers.clone(),
            method: self.method,
            url: self.url.clone(),
            sensitive: self.sensitive,
        }
    }
}

fn format_headers(headers: &Headers) -> String {
    if headers.is_empty() {
        return "<None>".to_string();
    }
    headers
        .iter()
        .sorted()
        .map(|(k, v)| format!("{k}: {v}"))
        .join("\n")
}

fn format_body(body: Option<&Vec<u8>>) -> String {
    match body {
        None => "<None>".to_string(),
        Some(value) => match std::str::from_utf8(value) {
            Ok(text) => text.to_string(),
            Err(_) => format!("<{} bytes of binary data>", value.len()),
        },
    }
}

fn log_request_details(location: &std::panic::Location, request: &Request) {
    let body = if request.sensitive {
        "<sensitive data>".to_string()
    } else {
        format_body(request.body.as_ref())
    };

    tracing::trace!(
        headers = %format_headers(&request.headers),
        %body,
        %location,
        "HTTP request"
    );
}
