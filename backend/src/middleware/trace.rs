//! Tracing middleware attaching a request-scoped context.
//!
//! Each incoming request receives a UUID [`TraceId`] and has its path recorded
//! in task-local storage. Domain errors pick up the trace identifier when they
//! are constructed; the HTTP error renderer reads the path when building the
//! failure payload.
//!
//! The context is also stored in the request extensions. A nested `Trace`
//! (for example the one [`configure`] mounts around the API services) reuses
//! it, so the trace identifier stays stable for the whole request.
//!
//! [`configure`]: crate::inbound::http::configure
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`RequestContext::scope`] when spawning new tasks so the active context
//! propagates.

use std::future::Future;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::error;
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static REQUEST_CONTEXT: RequestContext;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use vehicle_catalogue::middleware::trace::TraceId;
///
/// async fn handler() {
///     if let Some(id) = TraceId::current() {
///         println!("trace id: {id}");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the current trace identifier if a request is in scope.
    pub fn current() -> Option<Self> {
        REQUEST_CONTEXT.try_with(|context| context.trace_id).ok()
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Trace identifier and path of the request being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    trace_id: TraceId,
    path: String,
}

impl RequestContext {
    /// Pair a trace identifier with the request path.
    pub fn new(trace_id: TraceId, path: impl Into<String>) -> Self {
        Self {
            trace_id,
            path: path.into(),
        }
    }

    /// Returns the active context if one is in scope.
    pub fn current() -> Option<Self> {
        REQUEST_CONTEXT.try_with(Clone::clone).ok()
    }

    /// Path of the active request, if any.
    pub fn current_path() -> Option<String> {
        REQUEST_CONTEXT
            .try_with(|context| context.path.clone())
            .ok()
    }

    /// Trace identifier assigned to the request.
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// Request path as received, without the query string.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Execute the provided future with this context in scope.
    ///
    /// # Examples
    /// ```
    /// use vehicle_catalogue::middleware::trace::{RequestContext, TraceId};
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let context = RequestContext::new(trace_id, "/api/v1/vehicles");
    /// let observed = context.scope(async { TraceId::current() }).await;
    /// assert_eq!(observed, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_CONTEXT.scope(self, fut).await
    }
}

/// Tracing middleware attaching a [`RequestContext`] to every request and a
/// `trace-id` header to every response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use vehicle_catalogue::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let existing = req.extensions().get::<RequestContext>().cloned();
        let context = existing.unwrap_or_else(|| {
            let context = RequestContext::new(TraceId::generate(), req.path());
            req.extensions_mut().insert(context.clone());
            context
        });
        let trace_id = context.trace_id();
        let header_value = trace_id.to_string();
        let fut = self.service.call(req);
        Box::pin(context.scope(async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&header_value) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(error) => {
                    error!(
                        %error,
                        trace_id = %trace_id,
                        "failed to encode trace identifier header"
                    );
                }
            }
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    #[tokio::test]
    async fn current_reflects_scope() {
        let expected = TraceId::generate();
        let context = RequestContext::new(expected, "/api/v1/vehicles");
        let (trace_id, path) = context
            .scope(async { (TraceId::current(), RequestContext::current_path()) })
            .await;
        assert_eq!(trace_id, Some(expected));
        assert_eq!(path.as_deref(), Some("/api/v1/vehicles"));
    }

    #[tokio::test]
    async fn nothing_is_in_scope_outside_a_request() {
        assert!(TraceId::current().is_none());
        assert!(RequestContext::current().is_none());
    }

    #[tokio::test]
    async fn trace_id_from_str_round_trips() {
        let uuid = Uuid::nil();
        let trace_id: TraceId = uuid.to_string().parse().expect("parse uuid");
        assert_eq!(trace_id.to_string(), uuid.to_string());
    }

    #[actix_web::test]
    async fn adds_trace_id_header_and_exposes_context() {
        let app = actix_test::init_service(App::new().wrap(Trace).route(
            "/vehicles",
            web::get().to(|| async {
                let context = RequestContext::current().expect("context in scope");
                HttpResponse::Ok().body(format!("{} {}", context.trace_id(), context.path()))
            }),
        ))
        .await;
        let req = actix_test::TestRequest::get().uri("/vehicles?make=x").to_request();
        let res = actix_test::call_service(&app, req).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        let body = actix_test::read_body(res).await;
        let body = std::str::from_utf8(&body).expect("utf8 body");
        assert_eq!(body, format!("{header} /vehicles"));
    }

    #[actix_web::test]
    async fn nested_trace_keeps_the_outer_identifier() {
        let app = actix_test::init_service(
            App::new().wrap(Trace).service(
                web::scope("/api").wrap(Trace).route(
                    "/vehicles",
                    web::get().to(|| async {
                        let id = TraceId::current().expect("trace id in scope");
                        HttpResponse::Ok().body(id.to_string())
                    }),
                ),
            ),
        )
        .await;
        let req = actix_test::TestRequest::get().uri("/api/vehicles").to_request();
        let res = actix_test::call_service(&app, req).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        let body = actix_test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), header);
    }
}
