use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode, Url};
use tracing::{debug, warn};

use crate::context::SendContext;
use crate::errors::NtfyError;
use crate::models::{Level, Message};
use crate::transport::{HttpTransport, RelayRequest, ReqwestTransport};

const X_TITLE: HeaderName = HeaderName::from_static("x-title");
const X_PRIORITY: HeaderName = HeaderName::from_static("x-priority");
const X_TAGS: HeaderName = HeaderName::from_static("x-tags");
const X_ATTACH: HeaderName = HeaderName::from_static("x-attach");

/// ntfy relay client
///
/// Publishes notifications to `{host}/{topic}` with a bearer token. Cheap to
/// clone; clones share the underlying transport.
#[derive(Clone)]
pub struct NtfyClient {
    host: String,
    token: String,
    transport: Arc<dyn HttpTransport>,
}

impl NtfyClient {
    /// Create new ntfy client using the default reqwest transport
    ///
    /// # Arguments
    /// * `host` - Relay base URL, e.g. `https://ntfy.example.com`
    /// * `token` - Access token sent as `Authorization: Bearer <token>`
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_transport(host, token, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(
        host: impl Into<String>,
        token: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
            transport,
        }
    }

    /// Send a notification built from a priority, title and body
    pub async fn send(
        &self,
        ctx: &SendContext,
        topic: &str,
        priority: Level,
        title: &str,
        body: &str,
    ) -> Result<(), NtfyError> {
        let message = Message {
            title: title.to_string(),
            body: body.to_string(),
            priority,
            ..Default::default()
        };
        self.send_message(ctx, topic, Some(&message)).await
    }

    /// Publish `message` to `topic`
    ///
    /// A `None` message is a no-op and returns `Ok(())` without contacting the
    /// relay. Returns once the relay has answered `200 OK` and the response
    /// body has been read.
    pub async fn send_message(
        &self,
        ctx: &SendContext,
        topic: &str,
        message: Option<&Message>,
    ) -> Result<(), NtfyError> {
        let Some(message) = message else {
            return Ok(());
        };

        let request = self.build_request(topic, message)?;

        let mut response = ctx
            .run(self.transport.execute(request))
            .await
            .map_err(|e| NtfyError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            // The rejected body is released unread; a stalled body must not block the caller.
            drop(response);
            warn!(topic = %topic, status = %status, "Ntfy relay rejected notification");
            return Err(NtfyError::ServerRejected {
                status: status.to_string(),
            });
        }

        let body = ctx
            .run(response.read_body())
            .await
            .map_err(|e| {
                if e.is_context_error() {
                    NtfyError::Transport(e.to_string())
                } else {
                    NtfyError::Io(e.to_string())
                }
            })?;

        debug!(
            topic = %topic,
            response = %String::from_utf8_lossy(&body),
            "Ntfy send response"
        );

        Ok(())
    }

    /// Build the relay request for `message` without sending it
    pub fn build_request(&self, topic: &str, message: &Message) -> Result<RelayRequest, NtfyError> {
        if message.body.is_empty() {
            return Err(NtfyError::InvalidArgument(
                "invalid empty message body".to_string(),
            ));
        }

        let url = join_topic_url(&self.host, topic)?;

        let mut headers = HeaderMap::new();
        let mut authorization = header_value("Authorization", &format!("Bearer {}", self.token))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        if !message.title.is_empty() {
            headers.insert(X_TITLE, header_value("X-Title", &message.title)?);
        }
        if message.priority.is_set() {
            headers.insert(
                X_PRIORITY,
                header_value("X-Priority", &message.priority.to_string())?,
            );
        }
        if !message.tags.is_empty() {
            headers.insert(X_TAGS, header_value("X-Tags", &message.tags.join(","))?);
        }
        if !message.attach.is_empty() {
            headers.insert(X_ATTACH, header_value("X-Attach", &message.attach)?);
        }

        Ok(RelayRequest {
            method: Method::POST,
            url,
            headers,
            body: message.body.as_bytes().to_vec(),
        })
    }
}

impl fmt::Debug for NtfyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NtfyClient")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Join `host` and `topic` with exactly one `/` between them.
///
/// Any path already on `host` is kept, so `https://example.com/ntfy/` and
/// `alerts` give `https://example.com/ntfy/alerts`.
pub fn join_topic_url(host: &str, topic: &str) -> Result<Url, NtfyError> {
    let mut url = Url::parse(host)
        .map_err(|e| NtfyError::UrlConstruction(format!("invalid host {host:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(NtfyError::UrlConstruction(format!(
            "host {host:?} cannot carry a path"
        )));
    }

    let path = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        topic.trim_start_matches('/')
    );
    url.set_path(&path);
    Ok(url)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, NtfyError> {
    HeaderValue::from_str(value)
        .map_err(|e| NtfyError::InvalidArgument(format!("invalid {name} header value: {e}")))
}
