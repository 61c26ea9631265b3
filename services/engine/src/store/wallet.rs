//! Wallet/ledger primitives. Every balance mutation re-reads the row
//! under lock and pairs the update with exactly one immutable
//! `wallet_transactions` entry, inside the caller's transaction.

use crate::error::EngineError;
use crate::types::wallet_types::{TxStatus, TxType, Wallet, WalletTransaction};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Ensures a wallet row exists. Safe to call repeatedly.
pub async fn ensure_wallet(conn: &mut PgConnection, user_id: &str) -> Result<(), EngineError> {
    sqlx::query("INSERT INTO wallets (user_id, balance) VALUES ($1, 0) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Adds `amount` (> 0) to the user's balance and records the ledger
/// entry. Must run inside an open transaction.
pub async fn credit(
    conn: &mut PgConnection,
    user_id: &str,
    amount: i64,
    tx_type: TxType,
    description: &str,
) -> Result<i64, EngineError> {
    if amount <= 0 {
        return Err(EngineError::Invalid("Valor de crédito inválido.".into()));
    }

    ensure_wallet(&mut *conn, user_id).await?;

    let new_balance: i64 =
        sqlx::query_scalar("UPDATE wallets SET balance = balance + $1 WHERE user_id = $2 RETURNING balance")
            .bind(amount)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await?;

    record_transaction(conn, user_id, amount, tx_type, description).await?;
    Ok(new_balance)
}

/// Subtracts `amount` (> 0) from the user's balance, failing with
/// `Saldo insuficiente` before any write when funds do not cover it.
pub async fn debit(
    conn: &mut PgConnection,
    user_id: &str,
    amount: i64,
    tx_type: TxType,
    description: &str,
) -> Result<i64, EngineError> {
    if amount <= 0 {
        return Err(EngineError::Invalid("Valor de débito inválido.".into()));
    }

    let balance: Option<i64> =
        sqlx::query_scalar("SELECT balance FROM wallets WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?;

    let balance = balance.unwrap_or(0);
    if balance < amount {
        return Err(EngineError::InsufficientFunds);
    }

    let new_balance: i64 =
        sqlx::query_scalar("UPDATE wallets SET balance = balance - $1 WHERE user_id = $2 RETURNING balance")
            .bind(amount)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await?;

    record_transaction(conn, user_id, -amount, tx_type, description).await?;
    Ok(new_balance)
}

async fn record_transaction(
    conn: &mut PgConnection,
    user_id: &str,
    amount: i64,
    tx_type: TxType,
    description: &str,
) -> Result<(), EngineError> {
    sqlx::query(
        "INSERT INTO wallet_transactions (id, user_id, tx_type, description, amount, status)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(tx_type.as_str())
    .bind(description)
    .bind(amount)
    .bind(TxStatus::Concluido.as_str())
    .execute(conn)
    .await?;
    Ok(())
}

/// Balance plus history, newest first. Creates the wallet on first
/// sight so new users always see a zeroed wallet.
pub async fn get_wallet(pool: &PgPool, user_id: &str) -> Result<Wallet, EngineError> {
    let mut tx = pool.begin().await?;
    ensure_wallet(&mut tx, user_id).await?;

    let balance: i64 = sqlx::query_scalar("SELECT balance FROM wallets WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

    let transactions: Vec<WalletTransaction> = sqlx::query_as(
        "SELECT id, user_id, tx_type, description, amount, status, created_at
         FROM wallet_transactions WHERE user_id = $1 ORDER BY created_at DESC LIMIT 200",
    )
    .bind(user_id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(Wallet {
        user_id: user_id.to_string(),
        balance,
        transactions,
    })
}

/// Admin/top-up credit as its own transaction.
pub async fn deposit(
    pool: &PgPool,
    user_id: &str,
    amount: i64,
    description: &str,
) -> Result<i64, EngineError> {
    if amount <= 0 {
        return Err(EngineError::Invalid("Valor de depósito inválido.".into()));
    }
    let mut tx = pool.begin().await?;
    let balance = credit(&mut tx, user_id, amount, TxType::Deposito, description).await?;
    tx.commit().await?;
    Ok(balance)
}
