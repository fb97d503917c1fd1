//! HTTP server transport: receives pushed updates over a webhook.

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::post,
};
use tokio::net::TcpListener;
use tracing::{debug, info, trace, warn};

use telebot_core::{Dispatcher, TransportResult, Update};

/// Builds a router accepting `POST <path>` with one update per request body.
///
/// Every request is answered `200 OK`, including bodies that fail to decode,
/// so the platform does not redeliver them.
pub fn webhook_router(path: &str, dispatcher: Dispatcher) -> Router {
    let path = normalize_path(path);
    debug!(path = %path, "Registering webhook route");

    Router::new()
        .route(&path, post(receive_update))
        .with_state(dispatcher)
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

async fn receive_update(State(dispatcher): State<Dispatcher>, body: Bytes) -> StatusCode {
    trace!(len = body.len(), "Received webhook POST");

    match Update::from_slice(&body) {
        Ok(update) => {
            dispatcher.dispatch(update).await;
        }
        Err(e) => {
            warn!(error = %e, "Discarding undecodable webhook body");
        }
    }

    StatusCode::OK
}

/// A bound, not yet serving, webhook listener.
pub struct WebhookServer {
    listener: TcpListener,
    router: Router,
    path: String,
}

impl WebhookServer {
    /// Binds `addr` (e.g. `0.0.0.0:8443`) and prepares the route at `path`.
    pub async fn bind(addr: &str, path: &str, dispatcher: Dispatcher) -> TransportResult<Self> {
        let listener = TcpListener::bind(addr).await?;
        let router = webhook_router(path, dispatcher);

        Ok(Self {
            listener,
            router,
            path: normalize_path(path),
        })
    }

    /// Address actually bound, useful when binding port 0.
    pub fn local_addr(&self) -> TransportResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> TransportResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.listener.local_addr()?;
        info!(addr = %addr, path = %self.path, "Webhook server listening");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Webhook server stopped");
        Ok(())
    }
}

/// Binds `addr` and serves the webhook route until `shutdown` resolves.
pub async fn serve_webhook<F>(
    addr: &str,
    path: &str,
    dispatcher: Dispatcher,
    shutdown: F,
) -> TransportResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    WebhookServer::bind(addr, path, dispatcher)
        .await?
        .serve(shutdown)
        .await
}

impl std::fmt::Debug for WebhookServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookServer")
            .field("local_addr", &self.listener.local_addr().ok())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::body::Body;
    use axum::http::Request;
    use telebot_core::Registry;
    use tower::ServiceExt;

    fn counting_dispatcher(counter: &Arc<AtomicUsize>) -> Dispatcher {
        let registry = Registry::new();
        let c = Arc::clone(counter);
        registry.on_command("/start", "Start", move |_update: Arc<Update>| {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
            }
        });
        Dispatcher::new(registry.into_shared())
    }

    fn post(uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_webhook_dispatches_update() {
        let counter = Arc::new(AtomicUsize::new(0));
        let router = webhook_router("/hook123:abc", counting_dispatcher(&counter));

        let response = router
            .oneshot(post(
                "/hook123:abc",
                r#"{"update_id":1,"message":{"message_id":1,"text":"/start","chat":{"id":5}}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_undecodable_body_acknowledged() {
        let counter = Arc::new(AtomicUsize::new(0));
        let router = webhook_router("hook", counting_dispatcher(&counter));

        let response = router.oneshot(post("/hook", "not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_other_paths_not_routed() {
        let counter = Arc::new(AtomicUsize::new(0));
        let router = webhook_router("/hook", counting_dispatcher(&counter));

        let response = router
            .oneshot(post("/elsewhere", r#"{"update_id":1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let server = WebhookServer::bind("127.0.0.1:0", "/hook", Dispatcher::default())
            .await
            .unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve(async move {
            let _ = rx.await;
        }));

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();
    }
}
