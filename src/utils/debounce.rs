use tokio::{
    task::JoinHandle,
    time::{Duration, sleep},
};

/// Runs only the most recently scheduled task once `delay` has passed
/// without another call to [`Debouncer::schedule`].
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            task.await;
        }));
    }

    /// Schedules `search` for the trimmed `query`. A blank query only cancels
    /// the pending search. Returns whether a search was scheduled.
    pub fn schedule_query<S, F>(&mut self, query: &str, search: S) -> bool
    where
        S: FnOnce(String) -> F,
        F: Future<Output = ()> + Send + 'static,
    {
        let query = query.trim();
        if query.is_empty() {
            self.cancel();
            return false;
        }

        self.schedule(search(query.to_string()));
        true
    }

    /// Aborts the pending task, including one whose delay already elapsed and
    /// is still running.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    fn record(fired: Arc<Mutex<Vec<String>>>, query: &'static str) -> impl Future<Output = ()> {
        async move {
            if let Ok(mut fired) = fired.lock() {
                fired.push(query.to_string());
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_keystroke_fires() {
        let fired = Arc::new(Mutex::new(vec![]));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(record(fired.clone(), "A"));
        sleep(Duration::from_millis(200)).await;
        debouncer.schedule(record(fired.clone(), "AA"));
        sleep(Duration::from_millis(200)).await;
        debouncer.schedule(record(fired.clone(), "AAP"));
        sleep(Duration::from_millis(600)).await;

        assert_eq!(*fired.lock().unwrap(), vec!["AAP".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_firing() {
        let fired = Arc::new(Mutex::new(vec![]));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(record(fired.clone(), "MSFT"));
        sleep(Duration::from_millis(100)).await;
        debouncer.cancel();
        sleep(Duration::from_millis(1000)).await;

        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_cancels_pending_search() {
        let fired = Arc::new(Mutex::new(vec![]));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        let scheduled = debouncer.schedule_query(" AAPL ", |query| {
            let fired = fired.clone();
            async move {
                if let Ok(mut fired) = fired.lock() {
                    fired.push(query);
                }
            }
        });
        assert!(scheduled);

        sleep(Duration::from_millis(200)).await;
        let scheduled = debouncer.schedule_query("   ", |_| record(fired.clone(), "BLANK"));
        assert!(!scheduled);

        sleep(Duration::from_millis(1000)).await;
        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_is_trimmed() {
        let fired = Arc::new(Mutex::new(vec![]));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule_query("  msft ", |query| {
            let fired = fired.clone();
            async move {
                if let Ok(mut fired) = fired.lock() {
                    fired.push(query);
                }
            }
        });
        sleep(Duration::from_millis(600)).await;

        assert_eq!(*fired.lock().unwrap(), vec!["msft".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_keystrokes_all_fire() {
        let fired = Arc::new(Mutex::new(vec![]));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(record(fired.clone(), "K"));
        sleep(Duration::from_millis(600)).await;
        debouncer.schedule(record(fired.clone(), "KO"));
        sleep(Duration::from_millis(600)).await;

        assert_eq!(
            *fired.lock().unwrap(),
            vec!["K".to_string(), "KO".to_string()]
        );
    }
}
