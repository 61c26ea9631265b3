//! Promo code redemption. The conditional status flip guards against
//! two sessions redeeming the same code.

use crate::error::EngineError;
use crate::store::wallet;
use crate::types::store_types::{
    PromoCodeRow, PROMO_ACTIVE, PROMO_EXPIRED, PROMO_REDEEMED, PROMO_TYPE_DAILY, PROMO_TYPE_MONEY,
    PROMO_TYPE_ROLE, PROMO_TYPE_XP,
};
use crate::types::wallet_types::TxType;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn redeem_code(
    pool: &PgPool,
    user_id: &str,
    code: &str,
) -> Result<String, EngineError> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(EngineError::Invalid("Por favor, insira um código.".into()));
    }

    let mut tx = pool.begin().await?;

    let promo: Option<PromoCodeRow> = sqlx::query_as(
        "SELECT code, promo_type, value, description, status, expires_at
         FROM promo_codes WHERE code = $1 FOR UPDATE",
    )
    .bind(&code)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(promo) = promo else {
        return Err(EngineError::NotFound(
            "Código inválido ou não encontrado.".into(),
        ));
    };

    if promo.status != PROMO_ACTIVE {
        let reason = if promo.status == PROMO_REDEEMED {
            "resgatado"
        } else {
            "expirado/revogado"
        };
        return Err(EngineError::Rejected(format!(
            "Este código já foi {reason}."
        )));
    }

    if let Some(expires_at) = promo.expires_at {
        if expires_at < Utc::now() {
            // Commit the expiry flip; nothing else happened yet.
            sqlx::query("UPDATE promo_codes SET status = $1 WHERE code = $2")
                .bind(PROMO_EXPIRED)
                .bind(&code)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            return Err(EngineError::Rejected("Este código expirou.".into()));
        }
    }

    let updated = sqlx::query(
        "UPDATE promo_codes
         SET status = $1, redeemed_by = $2, redeemed_at = now()
         WHERE code = $3 AND status = $4",
    )
    .bind(PROMO_REDEEMED)
    .bind(user_id)
    .bind(&code)
    .bind(PROMO_ACTIVE)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(EngineError::Rejected(
            "Este código acabou de ser resgatado por outra pessoa. Tente novamente.".into(),
        ));
    }

    let detail = match promo.promo_type.as_str() {
        PROMO_TYPE_MONEY | PROMO_TYPE_DAILY => {
            let amount: i64 = promo
                .value
                .parse()
                .map_err(|_| EngineError::Rejected("Valor do código inválido.".into()))?;
            wallet::credit(&mut tx, user_id, amount, TxType::Bonus, &promo.description).await?;
            format!("Você ganhou R$ {:.2}!", amount as f64 / 100.0)
        }
        PROMO_TYPE_XP => {
            let amount: i64 = promo
                .value
                .parse()
                .map_err(|_| EngineError::Rejected("Valor do código inválido.".into()))?;
            sqlx::query("UPDATE users SET xp = xp + $1 WHERE discord_id = $2")
                .bind(amount)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            format!("Você ganhou {amount} de XP!")
        }
        PROMO_TYPE_ROLE => {
            sqlx::query(
                "INSERT INTO pending_rewards (id, user_id, reward_type, role_id, reason)
                 VALUES ($1, $2, 'role', $3, $4)",
            )
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&promo.value)
            .bind(format!("Resgate do código: {}", promo.description))
            .execute(&mut *tx)
            .await?;
            "Você ganhou um novo cargo! Verifique o Discord.".to_string()
        }
        other => {
            return Err(EngineError::Rejected(format!(
                "Tipo de código desconhecido: {other}"
            )));
        }
    };

    tx.commit().await?;

    Ok(format!(
        "Você resgatou o código \"{}\". {detail}",
        promo.code
    ))
}
