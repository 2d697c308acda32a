use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use tower_http::trace::TraceLayer;

use std::sync::Arc;

use crate::{ServerError, categories, groups, parties, transactions, user, wallets};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Resolve the bearer token into a user and attach it to the request.
async fn auth(
    State(state): State<ServerState>,
    auth_header: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Ok(TypedHeader(Authorization(bearer))) = auth_header else {
        return Err(ServerError::Unauthenticated);
    };

    let user = state
        .engine
        .user_by_token(bearer.token())
        .await?
        .ok_or(ServerError::Unauthenticated)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    let v1 = Router::new()
        .route("/groups", get(groups::list).post(groups::create))
        .route(
            "/groups/{id}",
            get(groups::show).put(groups::update).delete(groups::destroy),
        )
        .route("/parties", get(parties::list).post(parties::create))
        .route(
            "/parties/{id}",
            get(parties::show)
                .put(parties::update)
                .delete(parties::destroy),
        )
        .route("/wallets", get(wallets::list).post(wallets::create))
        .route(
            "/wallets/{id}",
            get(wallets::show)
                .put(wallets::update)
                .delete(wallets::destroy),
        )
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::destroy),
        )
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            get(transactions::show)
                .put(transactions::update)
                .delete(transactions::destroy),
        )
        .route("/user", get(user::show))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .nest("/v1", v1)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The HTTP application, ready to be served or driven directly in tests.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}
