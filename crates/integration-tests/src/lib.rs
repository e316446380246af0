//! Integration tests for the FLOAT. storefront.
//!
//! Each test starts its own storefront on an ephemeral port and talks to it
//! over real HTTP with a cookie-aware client, so sessions behave the way
//! they do in a browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p float-integration-tests
//! ```

use std::net::SocketAddr;

use float_core::Catalog;
use float_storefront::config::StorefrontConfig;
use float_storefront::state::AppState;
use reqwest::Client;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A storefront running in the background for the lifetime of the value.
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Bind to `127.0.0.1:0` and serve the default catalog.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no local address");

        let app = float_storefront::build_app(AppState::new(
            StorefrontConfig::default(),
            Catalog::default(),
        ));

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            let _ = float_storefront::serve(listener, app, shutdown).await;
        });

        Self {
            addr,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// A fresh client with its own cookie jar, i.e. a new visitor.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn visitor(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
