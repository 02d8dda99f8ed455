use std::time::Duration;

use bytes::{Bytes, BytesMut};
use http::header::{HeaderMap, HeaderValue, USER_AGENT};
use http::{Request, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};

use super::error::HttpError;
use super::tls::build_https_connector;
use crate::config::HttpSettings;

/// Read HTTP response.
///
/// `body` holds at most the configured `max_body_size` bytes; `truncated` is
/// set when the server sent more than that.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub truncated: bool,
}

impl HttpResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Single-attempt HTTP client over hyper and rustls.
///
/// No retries, no redirects. Every status code, including 4xx/5xx, is returned
/// as `Ok`; only URL, transport, TLS and timeout failures are errors. A body
/// over the size limit is cut at the limit and the status still comes back.
///
/// `HttpClient` is `Clone + Send + Sync`; clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    user_agent: HeaderValue,
    request_timeout: Option<Duration>,
    max_body_size: usize,
    allow_insecure_http: bool,
}

impl HttpClient {
    /// Build a client from settings.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Tls`] if the TLS connector cannot be built, or
    /// [`HttpError::RequestBuild`] if the user agent is not a valid header value.
    pub fn new(settings: &HttpSettings) -> Result<Self, HttpError> {
        if settings.allow_insecure_http {
            tracing::warn!("insecure HTTP enabled; use only for testing with mock servers");
        }

        let https = build_https_connector(settings.tls_roots, settings.allow_insecure_http)?;
        let inner = Client::builder(TokioExecutor::new())
            .pool_timer(TokioTimer::new())
            .build::<_, Full<Bytes>>(https);

        let user_agent = HeaderValue::from_str(&settings.user_agent)
            .map_err(|e| HttpError::RequestBuild(e.into()))?;

        Ok(Self {
            inner,
            user_agent,
            request_timeout: settings.request_timeout_ms.map(Duration::from_millis),
            max_body_size: settings.max_body_size,
            allow_insecure_http: settings.allow_insecure_http,
        })
    }

    /// Send a request and read the response body up to the size limit.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on invalid URL or scheme, transport failure or
    /// timeout.
    pub async fn send(&self, mut request: Request<Full<Bytes>>) -> Result<HttpResponse, HttpError> {
        self.check_uri(request.uri())?;
        request
            .headers_mut()
            .entry(USER_AGENT)
            .or_insert_with(|| self.user_agent.clone());

        match self.request_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.execute(request))
                .await
                .map_err(|_| HttpError::Timeout(timeout))?,
            None => self.execute(request).await,
        }
    }

    async fn execute(&self, request: Request<Full<Bytes>>) -> Result<HttpResponse, HttpError> {
        let response = self.inner.request(request).await?;
        let (parts, mut body) = response.into_parts();

        let mut buf = BytesMut::new();
        let mut truncated = false;
        while let Some(frame) = body.frame().await {
            let Ok(data) = frame?.into_data() else {
                continue;
            };
            let room = self.max_body_size - buf.len();
            if data.len() > room {
                buf.extend_from_slice(&data[..room]);
                truncated = true;
                break;
            }
            buf.extend_from_slice(&data);
        }

        if truncated {
            tracing::warn!(
                status = parts.status.as_u16(),
                limit = self.max_body_size,
                "Response body exceeded size limit, truncated"
            );
        }

        Ok(HttpResponse {
            status: parts.status,
            headers: parts.headers,
            body: buf.freeze(),
            truncated,
        })
    }

    fn check_uri(&self, uri: &http::Uri) -> Result<(), HttpError> {
        if uri.authority().is_none() {
            return Err(HttpError::InvalidUri {
                url: uri.to_string(),
                reason: "URL must be absolute with a host".to_owned(),
            });
        }
        match uri.scheme_str() {
            Some("https") => Ok(()),
            Some("http") if self.allow_insecure_http => Ok(()),
            Some("http") => Err(HttpError::InvalidScheme {
                scheme: "http".to_owned(),
                reason: "plain HTTP requires allow_insecure_http".to_owned(),
            }),
            Some(other) => Err(HttpError::InvalidScheme {
                scheme: other.to_owned(),
                reason: "only http and https are supported".to_owned(),
            }),
            None => Err(HttpError::InvalidUri {
                url: uri.to_string(),
                reason: "URL is missing a scheme".to_owned(),
            }),
        }
    }
}
