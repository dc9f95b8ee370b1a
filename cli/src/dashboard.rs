//! Dashboard orchestrator
//!
//! Drives the control flow around the music profile widget: mount the TUI,
//! run the authorization redirect once, wait for the redirect-back, then
//! spend the credential on the single profile fetch. Every error path is
//! terminal for this run: it is logged, and the widget either clears its
//! loading indicator (fetch failures) or keeps it (authorization never
//! completed), exactly mirroring the page-load lifecycle.

use crate::config::AppConfig;
use homeboard_shared::oauth::{AuthSession, CallbackListener, ImplicitFlow};
use homeboard_tui::InputEvent;
use std::time::Duration;
use tokio::sync::mpsc;

pub struct DashboardOptions {
    /// Log the authorization URL instead of launching a browser
    pub no_open: bool,
    /// How long to wait for the authorization redirect to come back
    pub auth_timeout: Duration,
}

pub async fn run(config: AppConfig, options: DashboardOptions) -> std::io::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<InputEvent>(100);
    let worker = tokio::spawn(authenticate_and_fetch(config, options, event_tx));

    let result = homeboard_tui::run_tui(event_rx).await;

    // The dashboard has unmounted; anything still in flight is discarded.
    worker.abort();
    result
}

/// The auth-then-fetch pipeline behind the widget.
///
/// Sends at most one event: `ProfileLoaded` or `ProfileUnavailable`, either
/// of which clears the loading skeleton. If authorization never completes
/// (bad config, denial, timeout) no event is sent and the widget stays on
/// the skeleton, since in the original flow the page was about to navigate
/// away anyway. Send failures are ignored: a late result after the TUI has
/// shut down must not go anywhere.
async fn authenticate_and_fetch(
    config: AppConfig,
    options: DashboardOptions,
    event_tx: mpsc::Sender<InputEvent>,
) {
    let mut session = AuthSession::new();
    let mut flow = ImplicitFlow::new((&config).into());

    let authorize_url = match flow.begin_authorization() {
        Ok(Some(url)) => url,
        // Redirect already issued for this mount; nothing more to do here
        Ok(None) => return,
        Err(e) => {
            tracing::error!("configuration error, authorization halted: {e}");
            return;
        }
    };

    // Listen before sending the browser away so the redirect has somewhere
    // to land.
    let listener = match CallbackListener::bind(&config.redirect_uri).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("cannot listen on redirect_uri {}: {e}", config.redirect_uri);
            return;
        }
    };

    if options.no_open {
        tracing::info!("open this URL to authorize: {authorize_url}");
    } else if let Err(e) = open::that_detached(&authorize_url) {
        tracing::error!("failed to open the browser: {e}");
        return;
    }

    let payload = match listener.wait_for_credential(options.auth_timeout).await {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("authorization did not complete: {e}");
            return;
        }
    };

    let token = match flow.accept_callback(&payload) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("authorization failed: {e}");
            return;
        }
    };
    session.store_token(token);

    // The one fetch this credential is good for
    let Some(token) = session.claim_fetch() else {
        return;
    };

    let client_config = homeboard_api::ClientConfig::from(&config);
    let client = match homeboard_api::Client::new(&client_config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("error building the profile client: {e}");
            let _ = event_tx.send(InputEvent::ProfileUnavailable).await;
            return;
        }
    };

    match client.current_user(&token).await {
        Ok(identity) => {
            tracing::debug!("fetched music profile for {}", identity.id);
            let _ = event_tx.send(InputEvent::ProfileLoaded(identity)).await;
        }
        Err(e) => {
            tracing::error!("error fetching music profile: {e}");
            let _ = event_tx.send(InputEvent::ProfileUnavailable).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(client_id: &str, redirect_uri: &str) -> AppConfig {
        AppConfig {
            client_id: client_id.to_string(),
            redirect_uri: redirect_uri.to_string(),
            accounts_url: "https://accounts.example.com".to_string(),
            api_url: "https://api.example.com".to_string(),
            config_path: String::new(),
        }
    }

    fn options(auth_timeout: Duration) -> DashboardOptions {
        DashboardOptions {
            no_open: true,
            auth_timeout,
        }
    }

    #[tokio::test]
    async fn missing_configuration_halts_without_events() {
        let (event_tx, mut event_rx) = mpsc::channel::<InputEvent>(8);

        authenticate_and_fetch(
            config("", "http://127.0.0.1:8888/callback"),
            options(Duration::from_secs(1)),
            event_tx,
        )
        .await;

        // No redirect, no state change: the widget stays on the skeleton
        assert!(event_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn callback_timeout_leaves_the_widget_loading() {
        // Reserve a free port for the redirect URI, then release it
        let probe = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = probe.local_addr().expect("addr").port();
        drop(probe);

        let (event_tx, mut event_rx) = mpsc::channel::<InputEvent>(8);

        authenticate_and_fetch(
            config("client-id", &format!("http://127.0.0.1:{port}/callback")),
            options(Duration::from_millis(50)),
            event_tx,
        )
        .await;

        assert!(event_rx.try_recv().is_err());
    }
}
