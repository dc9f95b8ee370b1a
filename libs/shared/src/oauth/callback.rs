//! Redirect-back handling for the implicit grant
//!
//! The provider returns the access token in the redirect URL. A one-shot
//! loopback listener bound to the redirect URI receives the browser when it
//! comes back. Because the implicit grant puts the token in the URL
//! *fragment* (which browsers never send to the server), the first request
//! is answered with a small relay page that re-issues the fragment
//! parameters as query parameters; the second request then carries the
//! token where the listener can see it. Query and fragment are parsed
//! identically throughout.

use super::error::{OAuthError, OAuthResult};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

const RELAY_HTML: &str = "<html><body><script>\
if (window.location.hash.length > 1) {\
  window.location.replace(window.location.pathname + '?' + window.location.hash.substring(1));\
}\
</script><p>Completing authentication&hellip;</p></body></html>";
const SUCCESS_HTML: &str =
    "<html><body><h1>Authentication successful</h1><p>You may close this window and return to the dashboard.</p></body></html>";
const ERROR_HTML: &str =
    "<html><body><h1>Authentication failed</h1><p>You may close this window.</p></body></html>";

/// Parameters carried by the redirect-back URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackPayload {
    pub access_token: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

impl CallbackPayload {
    /// Whether this payload resolves the wait (a token or a provider error)
    pub fn is_final(&self) -> bool {
        self.access_token.is_some() || self.error.is_some()
    }
}

/// Parse a redirect-back URL for the access token and friends.
///
/// The token may arrive as a query parameter or inside the fragment; both
/// are treated the same. A URL with neither is the normal pre-redirect
/// state, not an error: the payload simply carries nothing.
pub fn parse_callback_url(input: &str) -> OAuthResult<CallbackPayload> {
    let url = Url::parse(input)
        .map_err(|e| OAuthError::malformed_callback(format!("invalid callback URL: {e}")))?;

    let mut payload = CallbackPayload {
        access_token: None,
        state: None,
        error: None,
    };
    collect_params(url.query_pairs(), &mut payload);
    if let Some(fragment) = url.fragment() {
        collect_params(
            url::form_urlencoded::parse(fragment.as_bytes()),
            &mut payload,
        );
    }
    Ok(payload)
}

fn collect_params<'a>(
    pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    payload: &mut CallbackPayload,
) {
    for (key, value) in pairs {
        match key.as_ref() {
            "access_token" => payload.access_token = Some(value.to_string()),
            "state" => payload.state = Some(value.to_string()),
            "error" => payload.error = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Parse the request target of a callback HTTP request (e.g. `/callback?...`)
pub fn parse_request_target(target: &str) -> OAuthResult<CallbackPayload> {
    parse_callback_url(&format!("http://127.0.0.1{target}"))
}

fn extract_request_target(request: &str) -> OAuthResult<&str> {
    let first = request
        .lines()
        .next()
        .ok_or_else(|| OAuthError::malformed_callback("empty request"))?;
    let mut parts = first.split_whitespace();
    let method = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();
    if method != "GET" || target.is_empty() {
        return Err(OAuthError::malformed_callback("callback must be GET"));
    }
    Ok(target)
}

/// One-shot loopback listener for the authorization redirect
#[derive(Debug)]
pub struct CallbackListener {
    listener: TcpListener,
    path: String,
}

impl CallbackListener {
    /// Bind to the host and port of the configured redirect URI.
    ///
    /// The redirect URI must be a loopback `http` URL such as
    /// `http://127.0.0.1:8888/callback`.
    pub async fn bind(redirect_uri: &str) -> OAuthResult<Self> {
        let url = Url::parse(redirect_uri)
            .map_err(|e| OAuthError::invalid_redirect_uri(e.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| OAuthError::invalid_redirect_uri("missing host"))?
            .to_string();
        let port = url
            .port_or_known_default()
            .ok_or_else(|| OAuthError::invalid_redirect_uri("missing port"))?;

        let listener = TcpListener::bind((host.as_str(), port)).await?;
        Ok(Self {
            listener,
            path: url.path().to_string(),
        })
    }

    /// Local address the listener is bound to
    pub fn local_addr(&self) -> OAuthResult<std::net::SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Wait until the redirect-back delivers a token or a provider error.
    ///
    /// Requests without either (the initial fragment-carrying request) are
    /// answered with the relay page and the wait continues. After `timeout`
    /// the flow is left unauthenticated; no retry is attempted.
    pub async fn wait_for_credential(self, timeout: Duration) -> OAuthResult<CallbackPayload> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let accept = tokio::time::timeout_at(deadline, self.listener.accept());
            let (mut socket, _) = accept
                .await
                .map_err(|_| OAuthError::CallbackTimeout)?
                .map_err(OAuthError::Io)?;

            let mut buffer = vec![0u8; 8192];
            let size = socket.read(&mut buffer).await?;
            if size == 0 {
                continue;
            }

            let request = String::from_utf8_lossy(&buffer[..size]);
            let payload = match extract_request_target(request.as_ref())
                .and_then(|target| self.check_path(target).and(parse_request_target(target)))
            {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::debug!("ignoring stray callback request: {err}");
                    respond(&mut socket, "HTTP/1.1 404 Not Found", ERROR_HTML).await;
                    continue;
                }
            };

            if !payload.is_final() {
                // Fragment not yet relayed into the query string
                respond(&mut socket, "HTTP/1.1 200 OK", RELAY_HTML).await;
                continue;
            }

            let (status, body) = if payload.error.is_some() {
                ("HTTP/1.1 400 Bad Request", ERROR_HTML)
            } else {
                ("HTTP/1.1 200 OK", SUCCESS_HTML)
            };
            respond(&mut socket, status, body).await;
            return Ok(payload);
        }
    }

    fn check_path(&self, target: &str) -> OAuthResult<()> {
        let requested = target.split('?').next().unwrap_or(target);
        if requested == self.path {
            Ok(())
        } else {
            Err(OAuthError::malformed_callback(format!(
                "unexpected callback path {requested}"
            )))
        }
    }
}

async fn respond(socket: &mut tokio::net::TcpStream, status: &str, body: &str) {
    let response = format!(
        "{status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    #[test]
    fn parse_callback_url_extracts_token_from_query() {
        let payload =
            parse_callback_url("http://127.0.0.1:8888/callback?access_token=tok&state=xyz")
                .expect("payload");
        assert_eq!(payload.access_token.as_deref(), Some("tok"));
        assert_eq!(payload.state.as_deref(), Some("xyz"));
        assert!(payload.error.is_none());
    }

    #[test]
    fn parse_callback_url_extracts_token_from_fragment() {
        let payload =
            parse_callback_url("http://127.0.0.1:8888/callback#access_token=tok&state=xyz")
                .expect("payload");
        assert_eq!(payload.access_token.as_deref(), Some("tok"));
        assert_eq!(payload.state.as_deref(), Some("xyz"));
    }

    #[test]
    fn parse_callback_url_without_token_is_not_an_error() {
        let payload = parse_callback_url("http://127.0.0.1:8888/callback").expect("payload");
        assert!(payload.access_token.is_none());
        assert!(!payload.is_final());
    }

    #[test]
    fn parse_callback_url_carries_provider_error() {
        let payload = parse_callback_url("http://127.0.0.1:8888/callback?error=access_denied")
            .expect("payload");
        assert_eq!(payload.error.as_deref(), Some("access_denied"));
        assert!(payload.is_final());
    }

    #[test]
    fn parse_request_target_handles_relative_target() {
        let payload = parse_request_target("/callback?access_token=tok").expect("payload");
        assert_eq!(payload.access_token.as_deref(), Some("tok"));
    }

    async fn send_request(addr: std::net::SocketAddr, target: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.expect("connect");
        let request = format!("GET {target} HTTP/1.1\r\nHost: localhost\r\n\r\n");
        stream.write_all(request.as_bytes()).await.expect("write");
        let mut response = String::new();
        stream.read_to_string(&mut response).await.expect("read");
        response
    }

    #[tokio::test]
    async fn listener_serves_relay_page_then_resolves_with_token() {
        let listener = CallbackListener::bind("http://127.0.0.1:0/callback")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");

        let wait = tokio::spawn(listener.wait_for_credential(Duration::from_secs(5)));

        // First request mimics the browser landing with the token still in
        // the fragment: no visible parameters, so the relay page is served.
        let response = send_request(addr, "/callback").await;
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("location.hash"));

        // Second request carries the relayed parameters.
        let response = send_request(addr, "/callback?access_token=tok&state=xyz").await;
        assert!(response.contains("Authentication successful"));

        let payload = wait.await.expect("join").expect("payload");
        assert_eq!(payload.access_token.as_deref(), Some("tok"));
        assert_eq!(payload.state.as_deref(), Some("xyz"));
    }

    #[tokio::test]
    async fn listener_resolves_with_provider_error() {
        let listener = CallbackListener::bind("http://127.0.0.1:0/callback")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");

        let wait = tokio::spawn(listener.wait_for_credential(Duration::from_secs(5)));

        let response = send_request(addr, "/callback?error=access_denied").await;
        assert!(response.starts_with("HTTP/1.1 400 Bad Request"));

        let payload = wait.await.expect("join").expect("payload");
        assert_eq!(payload.error.as_deref(), Some("access_denied"));
    }

    #[tokio::test]
    async fn listener_times_out_without_callback() {
        let listener = CallbackListener::bind("http://127.0.0.1:0/callback")
            .await
            .expect("bind");

        let result = listener.wait_for_credential(Duration::from_millis(50)).await;
        assert!(matches!(result, Err(OAuthError::CallbackTimeout)));
    }

    #[tokio::test]
    async fn listener_ignores_unexpected_paths() {
        let listener = CallbackListener::bind("http://127.0.0.1:0/callback")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");

        let wait = tokio::spawn(listener.wait_for_credential(Duration::from_secs(5)));

        let response = send_request(addr, "/favicon.ico").await;
        assert!(response.starts_with("HTTP/1.1 404 Not Found"));

        let response = send_request(addr, "/callback?access_token=tok&state=xyz").await;
        assert!(response.contains("Authentication successful"));

        let payload = wait.await.expect("join").expect("payload");
        assert_eq!(payload.access_token.as_deref(), Some("tok"));
    }
}
