//! Application router configuration.

use axum::{
    Json, Router,
    http::{HeaderName, HeaderValue, header},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    summary::get_summary_endpoint,
    transaction::{
        TransactionStore, create_transaction_endpoint, delete_transaction_endpoint,
        edit_transaction_endpoint, get_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Headers added to every response unless the handler already set them.
const SECURITY_HEADERS: [(HeaderName, HeaderValue); 9] = [
    (
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    ),
    (
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    ),
    (
        HeaderName::from_static("cross-origin-resource-policy"),
        HeaderValue::from_static("same-origin"),
    ),
    (
        HeaderName::from_static("origin-agent-cluster"),
        HeaderValue::from_static("?1"),
    ),
    (header::REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
    (
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    ),
    (
        header::X_DNS_PREFETCH_CONTROL,
        HeaderValue::from_static("off"),
    ),
    (header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
    (
        HeaderName::from_static("x-permitted-cross-domain-policies"),
        HeaderValue::from_static("none"),
    ),
];

/// Return a router with all the app's routes.
///
/// Requests from any origin are allowed, the origin of each request is echoed
/// back in the CORS headers. Every response carries [SECURITY_HEADERS].
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: TransactionStore,
{
    let router: Router<AppState<S>> = Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint::<S>).get(list_transactions_endpoint::<S>),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint::<S>)
                .put(edit_transaction_endpoint::<S>)
                .delete(delete_transaction_endpoint::<S>),
        )
        .route(endpoints::SUMMARY, get(get_summary_endpoint::<S>))
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_404_not_found)
        .layer(cors_layer());

    add_security_headers(router).with_state(state)
}

fn add_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SECURITY_HEADERS
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(name, value))
        })
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Report that the server is up.
async fn get_health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
