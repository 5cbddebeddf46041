use crate::configuration::WindowSettings;
use crate::utils::json_failure;
use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderValue, RETRY_AFTER};
use actix_web::http::{Method, StatusCode};
use actix_web::middleware::Next;
use actix_web::{web, Error};
use dashmap::DashMap;
use ipnetwork::IpNetwork;
use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};

const THROTTLED_MESSAGE: &str = "Too many requests, please try again later.";

// Past this many tracked clients, expired windows are swept before counting.
const PURGE_THRESHOLD: usize = 10_000;

/// Works out which client a request should be counted against.
#[derive(Debug, Clone)]
pub struct ClientIpExtractor {
    trusted_proxies: Vec<IpNetwork>,
}

impl ClientIpExtractor {
    pub fn new(trusted_proxies: Vec<IpNetwork>) -> Self {
        Self { trusted_proxies }
    }

    /// `X-Forwarded-For` is only honoured when the peer is a trusted proxy.
    /// The chain is walked right to left and the first hop outside our own
    /// infrastructure is taken as the client.
    pub fn identify_client_ip(&self, forwarded_for: Option<&str>, peer_addr: IpAddr) -> IpAddr {
        if !self.is_trusted(&peer_addr) {
            return peer_addr;
        }

        forwarded_for
            .and_then(|xff| {
                xff.rsplit(',')
                    .filter_map(|s| s.trim().parse::<IpAddr>().ok())
                    .find(|ip| !self.is_trusted(ip))
            })
            .unwrap_or(peer_addr)
    }

    fn is_trusted(&self, ip: &IpAddr) -> bool {
        self.trusted_proxies.iter().any(|net| net.contains(*ip))
    }

    fn extract(&self, req: &ServiceRequest) -> IpAddr {
        let peer_ip = req
            .peer_addr()
            .map(|addr| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let forwarded_for = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok());

        self.identify_client_ip(forwarded_for, peer_ip)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32 },
    Throttled { retry_after: Duration },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    hits: u32,
}

/// Admits at most `max_requests` per client in each fixed window. The window
/// for a client opens with its first request and resets once it has elapsed.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    window: Duration,
    max_requests: u32,
    counters: DashMap<IpAddr, Window>,
}

impl FixedWindowLimiter {
    pub fn new(settings: WindowSettings) -> Self {
        Self {
            window: settings.window(),
            max_requests: settings.max_requests,
            counters: DashMap::new(),
        }
    }

    pub fn check(&self, client: IpAddr) -> Decision {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: IpAddr, now: Instant) -> Decision {
        if self.counters.len() >= PURGE_THRESHOLD {
            self.purge_expired(now);
        }

        let mut entry = self.counters.entry(client).or_insert(Window {
            started: now,
            hits: 0,
        });

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            *entry = Window {
                started: now,
                hits: 0,
            };
        }

        if entry.hits >= self.max_requests {
            let elapsed = now.saturating_duration_since(entry.started);
            return Decision::Throttled {
                retry_after: self.window.saturating_sub(elapsed),
            };
        }

        entry.hits += 1;
        Decision::Allowed {
            remaining: self.max_requests - entry.hits,
        }
    }

    fn purge_expired(&self, now: Instant) {
        self.counters
            .retain(|_, w| now.saturating_duration_since(w.started) < self.window);
    }
}

/// Per-process limiter state, shared by all workers.
#[derive(Debug)]
pub struct RateLimiters {
    pub extractor: ClientIpExtractor,
    pub global: FixedWindowLimiter,
    pub forms: FixedWindowLimiter,
}

impl RateLimiters {
    pub fn new(trusted_proxies: Vec<IpNetwork>, global: WindowSettings, forms: WindowSettings) -> Self {
        Self {
            extractor: ClientIpExtractor::new(trusted_proxies),
            global: FixedWindowLimiter::new(global),
            forms: FixedWindowLimiter::new(forms),
        }
    }
}

/// Applies the app-wide window to every request.
pub async fn global_rate_limit<B: MessageBody>(
    limiters: web::Data<RateLimiters>,
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    enforce(&limiters.global, &limiters.extractor, "global", req, next).await
}

/// Applies the stricter window shared by the form endpoints. Only
/// submissions are counted; other methods pass through to the 405 answer.
pub async fn form_rate_limit<B: MessageBody>(
    limiters: web::Data<RateLimiters>,
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    if req.method() != Method::POST {
        return Ok(next.call(req).await?.map_into_left_body());
    }
    enforce(&limiters.forms, &limiters.extractor, "forms", req, next).await
}

async fn enforce<B: MessageBody>(
    limiter: &FixedWindowLimiter,
    extractor: &ClientIpExtractor,
    scope: &'static str,
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let client_ip = extractor.extract(&req);

    match limiter.check(client_ip) {
        Decision::Allowed { remaining } => {
            tracing::trace!(%client_ip, scope, remaining, "Request admitted");
            Ok(next.call(req).await?.map_into_left_body())
        }
        Decision::Throttled { retry_after } => {
            // round up so clients never retry a moment too early
            let retry_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            tracing::warn!(
                %client_ip,
                scope,
                retry_after_secs = retry_secs,
                "Rate limit exceeded"
            );

            let mut response = json_failure(StatusCode::TOO_MANY_REQUESTS, THROTTLED_MESSAGE);
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_secs));
            Ok(req.into_response(response).map_into_right_body())
        }
    }
}
