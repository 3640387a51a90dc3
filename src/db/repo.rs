//! Account repository: merge-style partial updates keyed by address.

use crate::domain::{Address, AssetKey, MosaicBalance, ReconciliationResult};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::collections::BTreeMap;

/// Persisted account document, read back with its mosaic rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub address: Address,
    pub confirmed_balance: Option<i64>,
    pub unconfirmed_balance: Option<i64>,
    pub mosaics: BTreeMap<AssetKey, MosaicBalance>,
}

/// Repository for account documents.
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        AccountRepository { pool }
    }

    /// Apply one reconciliation result as a partial update.
    ///
    /// The account row is created if absent. Balance columns are written
    /// only when the result carries a balance; mosaic rows are upserted per
    /// key. Columns and keys not present in the result are left untouched.
    ///
    /// # Errors
    /// Returns an error if the transaction fails.
    pub async fn upsert_reconciliation(
        &self,
        result: &ReconciliationResult,
    ) -> Result<(), sqlx::Error> {
        let now = chrono::Utc::now().timestamp_millis();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO accounts (address) VALUES (?)
            ON CONFLICT(address) DO NOTHING
            "#,
        )
        .bind(result.address.as_str())
        .execute(&mut *tx)
        .await?;

        if let Some(balance) = &result.balance {
            sqlx::query(
                r#"
                UPDATE accounts
                SET confirmed_balance = ?, unconfirmed_balance = ?, updated_at = ?
                WHERE address = ?
                "#,
            )
            .bind(balance.confirmed)
            .bind(balance.unconfirmed)
            .bind(now)
            .bind(result.address.as_str())
            .execute(&mut *tx)
            .await?;
        }

        for (key, mosaic) in &result.mosaics {
            sqlx::query(
                r#"
                INSERT INTO account_mosaics (address, asset_key, confirmed, unconfirmed, updated_at)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT(address, asset_key) DO UPDATE SET
                    confirmed = excluded.confirmed,
                    unconfirmed = excluded.unconfirmed,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(result.address.as_str())
            .bind(key.as_str())
            .bind(mosaic.confirmed)
            .bind(mosaic.unconfirmed)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Read an account document with its mosaic rows, or None if the
    /// address has never been written.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_account(
        &self,
        address: &Address,
    ) -> Result<Option<AccountRecord>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT address, confirmed_balance, unconfirmed_balance
            FROM accounts
            WHERE address = ?
            "#,
        )
        .bind(address.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let confirmed_balance: Option<i64> = row.get("confirmed_balance");
        let unconfirmed_balance: Option<i64> = row.get("unconfirmed_balance");

        let mosaic_rows = sqlx::query(
            r#"
            SELECT asset_key, confirmed, unconfirmed
            FROM account_mosaics
            WHERE address = ?
            ORDER BY asset_key ASC
            "#,
        )
        .bind(address.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mosaics = mosaic_rows
            .iter()
            .map(|row| {
                let key: String = row.get("asset_key");
                let confirmed: i64 = row.get("confirmed");
                let unconfirmed: i64 = row.get("unconfirmed");
                (
                    AssetKey::from_raw(key),
                    MosaicBalance {
                        confirmed,
                        unconfirmed,
                    },
                )
            })
            .collect();

        Ok(Some(AccountRecord {
            address: address.clone(),
            confirmed_balance,
            unconfirmed_balance,
            mosaics,
        }))
    }
}
