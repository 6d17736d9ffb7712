use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use log::debug;
use tokio::sync::mpsc;

use crate::{CHANNEL_BUFFER_DEFAULT, data::earnings::EarningsData, ds::EarningsProvider};

#[derive(Debug)]
pub enum LoadEvent {
    Loaded(EarningsData),
    Failed { symbol: String, message: String },
}

/// Tracks the symbol the user is currently looking at.
///
/// Fetches for earlier selections may still complete, but their results are
/// never delivered once another symbol has been selected.
pub struct EarningsSession {
    provider: Arc<dyn EarningsProvider>,
    active: Arc<AtomicU64>,
    active_symbol: Option<String>,
    event_sender: mpsc::Sender<(u64, LoadEvent)>,
    event_receiver: mpsc::Receiver<(u64, LoadEvent)>,
}

impl EarningsSession {
    pub fn new(provider: Arc<dyn EarningsProvider>) -> Self {
        let (event_sender, event_receiver) =
            mpsc::channel::<(u64, LoadEvent)>(CHANNEL_BUFFER_DEFAULT);

        Self {
            provider,
            active: Arc::new(AtomicU64::new(0)),
            active_symbol: None,
            event_sender,
            event_receiver,
        }
    }

    pub fn active_symbol(&self) -> Option<&str> {
        self.active_symbol.as_deref()
    }

    pub fn select(&mut self, symbol: &str) {
        let ticket = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.active_symbol = Some(symbol.to_string());

        let provider = self.provider.clone();
        let active = self.active.clone();
        let event_sender = self.event_sender.clone();
        let symbol = symbol.to_string();

        tokio::spawn(async move {
            let event = match provider.earnings(&symbol).await {
                Ok(data) => LoadEvent::Loaded(data),
                Err(err) => LoadEvent::Failed {
                    symbol: symbol.clone(),
                    message: err.to_string(),
                },
            };

            if active.load(Ordering::SeqCst) != ticket {
                debug!("[Session] Dropped stale result of '{symbol}'");
                return;
            }

            let _ = event_sender.send((ticket, event)).await;
        });
    }

    /// Invalidates the in-flight request without starting a new one.
    pub fn clear(&mut self) {
        self.active.fetch_add(1, Ordering::SeqCst);
        self.active_symbol = None;
    }

    /// Waits for the result of the active selection, skipping any that went
    /// stale while queued.
    pub async fn next_event(&mut self) -> Option<LoadEvent> {
        while let Some((ticket, event)) = self.event_receiver.recv().await {
            if ticket == self.active.load(Ordering::SeqCst) {
                return Some(event);
            }
            debug!("[Session] Skipped stale event");
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::time::{Duration, sleep, timeout};

    use super::*;
    use crate::error::{FvError, FvResult};

    struct SlowProvider;

    #[async_trait]
    impl EarningsProvider for SlowProvider {
        async fn earnings(&self, symbol: &str) -> FvResult<EarningsData> {
            let delay = match symbol {
                "SLOW" => 300,
                _ => 10,
            };
            sleep(Duration::from_millis(delay)).await;

            if symbol == "FAIL" {
                return Err(FvError::Api {
                    status: 429,
                    message: "Limit Reach".to_string(),
                });
            }

            Ok(EarningsData {
                symbol: symbol.to_string(),
                ..Default::default()
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_suppressed() {
        let mut session = EarningsSession::new(Arc::new(SlowProvider));

        session.select("SLOW");
        session.select("FAST");
        assert_eq!(session.active_symbol(), Some("FAST"));

        match session.next_event().await {
            Some(LoadEvent::Loaded(data)) => assert_eq!(data.symbol, "FAST"),
            other => panic!("unexpected event {other:?}"),
        }

        let late = timeout(Duration::from_millis(1000), session.next_event()).await;
        assert!(late.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_wins_even_if_slower() {
        let mut session = EarningsSession::new(Arc::new(SlowProvider));

        session.select("FAST");
        session.select("SLOW");

        match session.next_event().await {
            Some(LoadEvent::Loaded(data)) => assert_eq!(data.symbol, "SLOW"),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_reported() {
        let mut session = EarningsSession::new(Arc::new(SlowProvider));

        session.select("FAIL");

        match session.next_event().await {
            Some(LoadEvent::Failed { symbol, message }) => {
                assert_eq!(symbol, "FAIL");
                assert_eq!(message, "[API Error] Limit Reach");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_drops_pending_result() {
        let mut session = EarningsSession::new(Arc::new(SlowProvider));

        session.select("AAPL");
        session.clear();
        assert_eq!(session.active_symbol(), None);

        let late = timeout(Duration::from_millis(1000), session.next_event()).await;
        assert!(late.is_err());
    }
}
