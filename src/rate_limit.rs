/// Per-address sliding window rate limiting
use crate::errors::ApiError;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tower::{Layer, Service};
use tracing::warn;

struct Hits {
    by_ip: HashMap<IpAddr, VecDeque<Instant>>,
    last_sweep: Instant,
}

impl Hits {
    /// Forget addresses with no hit inside the window
    fn sweep(&mut self, now: Instant, window: Duration) {
        self.by_ip.retain(|_, log| {
            log.back()
                .is_some_and(|last| now.duration_since(*last) < window)
        });
        self.last_sweep = now;
    }
}

struct SlidingWindow {
    hits: Mutex<Hits>,
    max_requests: usize,
    window: Duration,
}

impl SlidingWindow {
    fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            hits: Mutex::new(Hits {
                by_ip: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            max_requests: max_requests as usize,
            window,
        }
    }

    fn check(&self, ip: IpAddr) -> bool {
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> bool {
        let mut hits = self
            .hits
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if now.duration_since(hits.last_sweep) >= self.window {
            hits.sweep(now, self.window);
        }

        let log = hits.by_ip.entry(ip).or_default();
        while let Some(oldest) = log.front() {
            if now.duration_since(*oldest) >= self.window {
                log.pop_front();
            } else {
                break;
            }
        }

        if log.len() < self.max_requests {
            log.push_back(now);
            true
        } else {
            false
        }
    }
}

/// Tower layer capping requests per client IP over a sliding window.
///
/// Falls open if the client IP cannot be determined (e.g. missing `ConnectInfo`).
#[derive(Clone)]
pub struct RateLimitLayer {
    limiter: Arc<SlidingWindow>,
}

impl RateLimitLayer {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            limiter: Arc::new(SlidingWindow::new(max_requests, window)),
        }
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            limiter: Arc::clone(&self.limiter),
        }
    }
}

#[derive(Clone)]
pub struct RateLimitService<S> {
    inner: S,
    limiter: Arc<SlidingWindow>,
}

impl<S> Service<Request<Body>> for RateLimitService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let limiter = Arc::clone(&self.limiter);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let ip = request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0.ip());

            if let Some(ip) = ip {
                if !limiter.check(ip) {
                    warn!(%ip, "rate limit exceeded");
                    return Ok(ApiError::RateLimited.into_response());
                }
            }

            inner.call(request).await
        })
    }
}
