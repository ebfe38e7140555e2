//! Background retention sweep for the in-memory session store.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use menubot_core::chat::session_store::SessionStore;

/// Run `store.sweep` every `interval` until `cancel` fires.
pub fn spawn_session_sweeper<S>(
    store: Arc<S>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: SessionStore + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Session sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    store.sweep(chrono::Utc::now());
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use menubot_core::chat::eviction::IdleTtl;
    use menubot_core::chat::session_store::InMemorySessionStore;
    use menubot_types::chat::{SessionKey, Turn};

    #[tokio::test]
    async fn test_sweeper_evicts_idle_sessions_and_stops_on_cancel() {
        let store = Arc::new(InMemorySessionStore::with_policy(
            Box::new(IdleTtl::new(Duration::from_millis(10))),
            None,
        ));
        store.append(&SessionKey::new("idle"), Turn::user("hi"));

        let cancel = CancellationToken::new();
        let handle = spawn_session_sweeper(
            Arc::clone(&store),
            Duration::from_millis(20),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(store.session_count(), 0);

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
