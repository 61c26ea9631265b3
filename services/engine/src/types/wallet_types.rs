use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Ledger entry kinds. Stored as their display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxType {
    #[serde(rename = "Aposta")]
    Aposta,
    #[serde(rename = "Prêmio")]
    Premio,
    #[serde(rename = "Bônus")]
    Bonus,
    #[serde(rename = "Loja")]
    Loja,
    #[serde(rename = "Depósito")]
    Deposito,
    #[serde(rename = "Saque")]
    Saque,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Aposta => "Aposta",
            TxType::Premio => "Prêmio",
            TxType::Bonus => "Bônus",
            TxType::Loja => "Loja",
            TxType::Deposito => "Depósito",
            TxType::Saque => "Saque",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    #[serde(rename = "Concluído")]
    Concluido,
    #[serde(rename = "Pendente")]
    Pendente,
    #[serde(rename = "Cancelado")]
    Cancelado,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Concluido => "Concluído",
            TxStatus::Pendente => "Pendente",
            TxStatus::Cancelado => "Cancelado",
        }
    }
}

/// One immutable ledger row. `amount` is signed centavos: debits are
/// negative, credits positive.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WalletTransaction {
    pub id: Uuid,
    pub user_id: String,
    pub tx_type: String,
    pub description: String,
    pub amount: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Wallet {
    pub user_id: String,
    pub balance: i64,
    pub transactions: Vec<WalletTransaction>,
}
