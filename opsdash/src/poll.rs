//! Generic polling subscription: one fetch function, one interval, and a
//! generation token that guarantees no stale result is ever applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::api::ApiError;

/// Observable snapshot of a subscription. `loading` is true from the moment
/// a fetch is issued until that specific fetch settles or is superseded.
#[derive(Debug, Clone)]
pub struct SubscriptionState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for SubscriptionState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

/// State cell plus a monotonically increasing generation. Every fetch is
/// tied to the token `begin` handed out; `settle` applies a result only if
/// that token is still current. Cancellation is just bumping the
/// generation, so there is no separate destroyed flag.
pub struct Subscription<T> {
    state: Mutex<SubscriptionState<T>>,
    generation: AtomicU64,
}

impl<T> Subscription<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SubscriptionState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Start a fetch: bump the generation, mark loading, and return the
    /// token the caller must present when settling.
    pub fn begin(&self) -> u64 {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.lock().unwrap().loading = true;
        token
    }

    /// Apply a fetch result. Returns false (and changes nothing) when the
    /// token was superseded by a newer `begin` or by `invalidate`. On error
    /// the previous data is kept so the display degrades instead of
    /// blanking.
    pub fn settle(&self, token: u64, result: Result<T, ApiError>) -> bool {
        if token != self.generation.load(Ordering::SeqCst) {
            tracing::debug!(token, "discarding stale fetch result");
            return false;
        }
        let mut s = self.state.lock().unwrap();
        s.loading = false;
        match result {
            Ok(v) => {
                s.data = Some(v);
                s.error = None;
            }
            Err(e) => {
                s.error = Some(e.to_string());
            }
        }
        true
    }

    /// Invalidate any in-flight fetch without starting a new one. Used on
    /// teardown; a later `settle` with an old token becomes a no-op.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap().loading = false;
    }
}

impl<T: Clone> Subscription<T> {
    pub fn snapshot(&self) -> SubscriptionState<T> {
        self.state.lock().unwrap().clone()
    }
}

impl<T> Default for Subscription<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawned polling loop around a [`Subscription`]. `P` is the parameter set
/// the fetch closes over (range token, filter text); changing it re-enters
/// the fetch cycle immediately, superseding anything in flight.
pub struct Poller<P, T> {
    sub: Arc<Subscription<T>>,
    params: Arc<Mutex<P>>,
    wake: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl<P, T> Poller<P, T>
where
    P: Clone + Send + 'static,
    T: Clone + Send + 'static,
{
    pub fn spawn<F>(interval: Duration, params: P, fetch: F) -> Self
    where
        F: Fn(P) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync + 'static,
    {
        let sub = Arc::new(Subscription::new());
        let params = Arc::new(Mutex::new(params));
        let wake = Arc::new(Notify::new());

        let handle = tokio::spawn({
            let sub = Arc::clone(&sub);
            let params = Arc::clone(&params);
            let wake = Arc::clone(&wake);
            async move {
                loop {
                    let token = sub.begin();
                    let p = params.lock().unwrap().clone();
                    let fut = fetch(p);
                    tokio::select! {
                        res = fut => {
                            sub.settle(token, res);
                            // Wait out the tick, or refetch early on wakeup.
                            tokio::select! {
                                _ = sleep(interval) => {}
                                _ = wake.notified() => {}
                            }
                        }
                        // Superseded while in flight: drop the future and
                        // loop. The next begin() bumps the generation, so
                        // last-issued wins even if the transport had raced.
                        _ = wake.notified() => {}
                    }
                }
            }
        });

        Self {
            sub,
            params,
            wake,
            handle,
        }
    }

    pub fn snapshot(&self) -> SubscriptionState<T> {
        self.sub.snapshot()
    }

    /// Replace the parameter set and refetch immediately.
    pub fn set_params(&self, p: P) {
        *self.params.lock().unwrap() = p;
        self.wake.notify_one();
    }

    pub fn params(&self) -> P {
        self.params.lock().unwrap().clone()
    }

    /// Refetch now with the current parameters.
    pub fn refresh(&self) {
        self.wake.notify_one();
    }

    /// Stop the timer and invalidate the generation so nothing settles
    /// after teardown.
    pub fn stop(&self) {
        self.handle.abort();
        self.sub.invalidate();
    }
}

impl<P, T> Drop for Poller<P, T> {
    fn drop(&mut self) {
        self.handle.abort();
        self.sub.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn net_err() -> ApiError {
        ApiError::Network("unreachable".into())
    }

    #[test]
    fn settle_out_of_order_keeps_last_issued() {
        let sub: Subscription<u32> = Subscription::new();
        let a = sub.begin();
        let b = sub.begin();
        // B resolves first, then A arrives late.
        assert!(sub.settle(b, Ok(2)));
        assert!(!sub.settle(a, Ok(1)));
        let s = sub.snapshot();
        assert_eq!(s.data, Some(2));
        assert!(!s.loading);
        assert!(s.error.is_none());
    }

    #[test]
    fn error_preserves_stale_data() {
        let sub: Subscription<u32> = Subscription::new();
        let t = sub.begin();
        assert!(sub.settle(t, Ok(7)));
        let t = sub.begin();
        assert!(sub.settle(t, Err(net_err())));
        let s = sub.snapshot();
        assert_eq!(s.data, Some(7));
        assert_eq!(s.error.as_deref(), Some("network error: unreachable"));
        assert!(!s.loading);
    }

    #[test]
    fn success_clears_previous_error() {
        let sub: Subscription<u32> = Subscription::new();
        let t = sub.begin();
        sub.settle(t, Err(net_err()));
        let t = sub.begin();
        sub.settle(t, Ok(3));
        let s = sub.snapshot();
        assert_eq!(s.data, Some(3));
        assert!(s.error.is_none());
    }

    #[test]
    fn loading_spans_begin_to_matching_settle() {
        let sub: Subscription<u32> = Subscription::new();
        let a = sub.begin();
        assert!(sub.snapshot().loading);
        let b = sub.begin();
        // A's late result must not clear loading while B is outstanding.
        assert!(!sub.settle(a, Ok(1)));
        assert!(sub.snapshot().loading);
        assert!(sub.settle(b, Ok(2)));
        assert!(!sub.snapshot().loading);
    }

    #[test]
    fn invalidate_blocks_in_flight_settle() {
        let sub: Subscription<u32> = Subscription::new();
        let t = sub.begin();
        sub.invalidate();
        assert!(!sub.settle(t, Ok(9)));
        let s = sub.snapshot();
        assert!(s.data.is_none());
        assert!(!s.loading);
    }

    #[tokio::test]
    async fn poller_applies_results_and_stops_cleanly() {
        let calls = Arc::new(AtomicUsize::new(0));
        let poller = {
            let calls = Arc::clone(&calls);
            Poller::spawn(Duration::from_millis(5), (), move |()| {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                Box::pin(async move { Ok(n) }) as BoxFuture<'static, Result<usize, ApiError>>
            })
        };

        // Give the loop a few ticks.
        sleep(Duration::from_millis(50)).await;
        let s = poller.snapshot();
        assert!(s.data.is_some());
        assert!(s.error.is_none());

        poller.stop();
        sleep(Duration::from_millis(20)).await;
        let after_stop = calls.load(Ordering::SeqCst);
        sleep(Duration::from_millis(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_stop, "poller kept fetching after stop");
        assert!(!poller.snapshot().loading);
    }

    #[tokio::test]
    async fn set_params_supersedes_in_flight_fetch() {
        // The first fetch ("slow") never resolves; changing params must
        // leave the slow result unapplied and settle with the fast one.
        let poller = Poller::spawn(Duration::from_secs(60), "slow".to_string(), |p: String| {
            Box::pin(async move {
                if p == "slow" {
                    sleep(Duration::from_secs(3600)).await;
                }
                Ok(p)
            }) as BoxFuture<'static, Result<String, ApiError>>
        });

        sleep(Duration::from_millis(20)).await;
        assert!(poller.snapshot().data.is_none());

        poller.set_params("fast".to_string());
        sleep(Duration::from_millis(50)).await;
        let s = poller.snapshot();
        assert_eq!(s.data.as_deref(), Some("fast"));
        poller.stop();
    }
}
