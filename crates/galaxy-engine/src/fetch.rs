//! Remote fetch client: request lifecycle and loading state
//!
//! `start` marks the state as loading and hands back a future that performs
//! the exchange; `complete` applies its outcome. The viewer runs the future
//! on tokio and applies the completion on the event-loop thread, so only that
//! thread ever writes `AppState`.
//!
//! Overlapping requests are not serialised: whichever completes last decides
//! the final state. Request ids only correlate log lines.

use crate::error::FetchResult;
use crate::http_adapter::StarQueryService;
use crate::state::{AppState, LoadingState};

use galaxy_core::{QueryParams, StarQueryResponse};

use std::future::Future;
use std::sync::Arc;

/// Outcome of one exchange, ready to be applied to `AppState`
#[derive(Debug)]
pub struct FetchCompletion {
    pub request_id: u64,
    pub params: QueryParams,
    pub result: FetchResult<StarQueryResponse>,
}

pub struct FetchClient<S> {
    service: Arc<S>,
    issued: u64,
}

impl<S: StarQueryService + 'static> FetchClient<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service, issued: 0 }
    }

    /// Number of requests started so far
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Enter `Loading` and return the exchange for `params`
    pub fn start(
        &mut self,
        state: &mut AppState,
        params: QueryParams,
    ) -> impl Future<Output = FetchCompletion> + Send + 'static {
        self.issued += 1;
        let request_id = self.issued;
        state.mark_loading();

        tracing::info!(
            request_id,
            min_dist = params.min_dist,
            max_dist = params.max_dist,
            healpix = ?params.healpix.map(|s| s.id()),
            year = params.year,
            "Fetching stars"
        );

        let service = Arc::clone(&self.service);
        async move {
            let result = service.query_stars(params).await;
            FetchCompletion { request_id, params, result }
        }
    }

    /// Apply a finished exchange. A failure keeps the previous stars.
    pub fn complete(&self, state: &mut AppState, completion: FetchCompletion) -> LoadingState {
        let FetchCompletion { request_id, result, .. } = completion;
        match result {
            Ok(response) => {
                tracing::info!(
                    request_id,
                    count = response.count,
                    received = response.stars.len(),
                    "Stars loaded"
                );
                state.replace_stars(response.stars, response.count);
            }
            Err(err) => {
                tracing::error!(request_id, "Error fetching stars: {}", err);
                state.mark_failed(err.to_string());
            }
        }
        state.loading()
    }

    /// `start` then `complete` in one call
    pub async fn fetch(&mut self, state: &mut AppState, params: QueryParams) -> LoadingState {
        let exchange = self.start(state, params);
        let completion = exchange.await;
        self.complete(state, completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use galaxy_core::StarRecord;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replies with queued results in order
    struct ScriptedService {
        replies: Mutex<VecDeque<FetchResult<StarQueryResponse>>>,
    }

    impl ScriptedService {
        fn new(replies: Vec<FetchResult<StarQueryResponse>>) -> Arc<Self> {
            Arc::new(Self { replies: Mutex::new(replies.into()) })
        }
    }

    impl StarQueryService for ScriptedService {
        fn query_stars(
            &self,
            _params: QueryParams,
        ) -> impl Future<Output = FetchResult<StarQueryResponse>> + Send {
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::Unavailable("no scripted reply".into())));
            std::future::ready(reply)
        }
    }

    fn response(n: usize) -> StarQueryResponse {
        StarQueryResponse::from_stars(
            (0..n)
                .map(|i| StarRecord::new(i.to_string(), i as f64, 0.0, 0.0))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_success_replaces_stars() {
        let mut client = FetchClient::new(ScriptedService::new(vec![Ok(response(3))]));
        let mut state = AppState::new();

        let outcome = client.fetch(&mut state, QueryParams::default()).await;
        assert_eq!(outcome, LoadingState::Loaded(3));
        assert_eq!(state.stars().len(), 3);
        assert_eq!(client.issued(), 1);
    }

    #[tokio::test]
    async fn test_loading_before_completion() {
        let mut client = FetchClient::new(ScriptedService::new(vec![Ok(response(1))]));
        let mut state = AppState::new();

        let exchange = client.start(&mut state, QueryParams::default());
        assert_eq!(state.loading(), LoadingState::Loading);

        let completion = exchange.await;
        client.complete(&mut state, completion);
        assert_eq!(state.loading(), LoadingState::Loaded(1));
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_stars() {
        let mut client = FetchClient::new(ScriptedService::new(vec![
            Ok(response(2)),
            Err(FetchError::Transport("connection reset".into())),
        ]));
        let mut state = AppState::new();

        client.fetch(&mut state, QueryParams::default()).await;
        let revision = state.stars().revision();

        let outcome = client.fetch(&mut state, QueryParams::default()).await;
        assert_eq!(outcome, LoadingState::Error);
        assert_eq!(state.stars().len(), 2);
        assert_eq!(state.stars().revision(), revision);
        assert!(state.last_error().unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_count_comes_from_response() {
        let mut reply = response(2);
        reply.count = 5;
        let mut client = FetchClient::new(ScriptedService::new(vec![Ok(reply)]));
        let mut state = AppState::new();

        assert_eq!(client.fetch(&mut state, QueryParams::default()).await, LoadingState::Loaded(5));
        assert_eq!(state.stars().len(), 2);
    }

    /// Replies with as many stars as `max_dist`
    struct EchoService;

    impl StarQueryService for EchoService {
        fn query_stars(
            &self,
            params: QueryParams,
        ) -> impl Future<Output = FetchResult<StarQueryResponse>> + Send {
            std::future::ready(Ok(response(params.max_dist as usize)))
        }
    }

    #[tokio::test]
    async fn test_last_completion_wins() {
        let mut client = FetchClient::new(Arc::new(EchoService));
        let mut state = AppState::new();

        let near = QueryParams {
            max_dist: 10.0,
            ..QueryParams::default()
        };
        let far = QueryParams {
            max_dist: 20.0,
            ..QueryParams::default()
        };
        let first = client.start(&mut state, near);
        let second = client.start(&mut state, far);

        // The later request resolves first; the stale one overwrites it
        let second = second.await;
        let first = first.await;
        assert_eq!(second.request_id, 2);
        client.complete(&mut state, second);
        assert_eq!(state.loading(), LoadingState::Loaded(20));
        client.complete(&mut state, first);

        assert_eq!(state.loading(), LoadingState::Loaded(10));
        assert_eq!(state.stars().len(), 10);
        assert_eq!(state.stars().revision(), 2);
    }
}
