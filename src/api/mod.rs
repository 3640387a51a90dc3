pub mod accounts;
pub mod health;
pub mod transactions;

use crate::db::AccountRepository;
use crate::transport::{QueueHandle, TopicScheme};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<AccountRepository>,
    pub queue: QueueHandle,
    pub topics: TopicScheme,
}

impl AppState {
    pub fn new(repo: Arc<AccountRepository>, queue: QueueHandle, topics: TopicScheme) -> Self {
        Self {
            repo,
            queue,
            topics,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/transactions/:address", post(transactions::submit_transaction))
        .route("/accounts/:address", get(accounts::get_account))
        .layer(cors)
        .with_state(state)
}
