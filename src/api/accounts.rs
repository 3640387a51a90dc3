//! Read surface for persisted account documents.

use super::AppState;
use crate::domain::{Address, Balance};
use crate::error::AppError;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn get_account(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let address = Address::new(address);
    let record = state
        .repo
        .get_account(&address)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No account for {}", address)))?;

    // Balance rendered with the native divisibility applied, as read
    // surfaces expect; absent when the node never reported one.
    let balance = record.confirmed_balance.map(|confirmed| {
        Balance {
            confirmed,
            unconfirmed: record.unconfirmed_balance.unwrap_or(0),
        }
        .with_divisibility()
    });

    Ok(Json(serde_json::json!({
        "address": record.address,
        "balance": balance,
        "mosaics": record.mosaics,
    })))
}
