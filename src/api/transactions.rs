//! Ingestion adapter: accepts a raw transaction and enqueues it on the
//! transport with the canonical transaction topic.

use super::AppState;
use crate::domain::Address;
use crate::error::AppError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

pub async fn submit_transaction(
    State(state): State<AppState>,
    Path(address): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    if serde_json::from_slice::<serde_json::Value>(&body).is_err() {
        return Err(AppError::BadRequest(
            "body must be a JSON transaction".to_string(),
        ));
    }

    let address = Address::new(address);
    let routing_key = state.topics.transaction_topic(&address);
    let delivery_tag = state.queue.publish(&routing_key, body.to_vec()).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({
            "address": address,
            "deliveryTag": delivery_tag,
        })),
    ))
}
