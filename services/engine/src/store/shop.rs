//! Store purchases: VIP pricing, duplicate-entitlement checks, inline
//! effects (XP, ad removal) and redemption codes for role grants.

use crate::error::EngineError;
use crate::store::wallet;
use crate::types::store_types::{
    InventoryItem, PurchaseReceipt, StoreItem, DURATION_MONTHLY, DURATION_PERMANENT, ITEM_AD_REMOVAL,
    ITEM_ROLE, ITEM_XP_BOOST,
};
use crate::types::wallet_types::TxType;
use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub const VIP_DISCOUNT_MULTIPLIER: f64 = 0.9;
const CODE_RETRY_LIMIT: u32 = 10;

/// Price after the VIP discount. Role items are sold at list price for
/// everyone.
pub fn effective_price(list_price: i64, item_type: &str, is_vip: bool) -> i64 {
    if is_vip && item_type != ITEM_ROLE {
        (list_price as f64 * VIP_DISCOUNT_MULTIPLIER).round() as i64
    } else {
        list_price
    }
}

fn generate_code<R: Rng>(rng: &mut R) -> String {
    let suffix: String = rng
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect();
    format!("FB-{suffix}")
}

/// Draws codes until one is free. Collisions are vanishingly rare; the
/// retry cap turns a pathological RNG into a loud failure instead of a
/// hang.
async fn unique_redemption_code(conn: &mut PgConnection) -> Result<String, EngineError> {
    let mut rng = rand::thread_rng();
    for _ in 0..CODE_RETRY_LIMIT {
        let code = generate_code(&mut rng);
        let exists: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM user_inventory WHERE redemption_code = $1",
        )
        .bind(&code)
        .fetch_optional(&mut *conn)
        .await?;
        if exists.is_none() {
            return Ok(code);
        }
    }
    Err(EngineError::Rejected(
        "Não foi possível gerar um código de resgate.".into(),
    ))
}

pub async fn get_store_items(pool: &PgPool) -> Result<Vec<StoreItem>, EngineError> {
    let items: Vec<StoreItem> = sqlx::query_as(
        "SELECT id, name, description, price, item_type, duration, duration_days, role_id,
                xp_amount, is_active, created_at
         FROM store_items WHERE is_active = TRUE ORDER BY price",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn get_user_inventory(
    pool: &PgPool,
    user_id: &str,
) -> Result<Vec<InventoryItem>, EngineError> {
    let items: Vec<InventoryItem> = sqlx::query_as(
        "SELECT id, user_id, item_id, item_name, price_paid, item_type, item_duration,
                redemption_code, is_redeemed, purchased_at, redeemed_at, expires_at
         FROM user_inventory WHERE user_id = $1 ORDER BY purchased_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn purchase_item(
    pool: &PgPool,
    user_id: &str,
    item_id: &str,
) -> Result<PurchaseReceipt, EngineError> {
    let mut tx = pool.begin().await?;

    let item: Option<StoreItem> = sqlx::query_as(
        "SELECT id, name, description, price, item_type, duration, duration_days, role_id,
                xp_amount, is_active, created_at
         FROM store_items WHERE id = $1 AND is_active = TRUE",
    )
    .bind(item_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(item) = item else {
        return Err(EngineError::NotFound("Item não encontrado.".into()));
    };

    let is_vip: bool =
        sqlx::query_scalar("SELECT is_vip FROM users WHERE discord_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .unwrap_or(false);

    let price = effective_price(item.price, &item.item_type, is_vip);

    // A still-active entitlement (permanent, or monthly not yet
    // expired) blocks a duplicate purchase.
    let already_owned: Option<i32> = sqlx::query_scalar(
        "SELECT 1 FROM user_inventory
         WHERE user_id = $1 AND item_id = $2
           AND (item_duration = $3 OR (item_duration = $4 AND expires_at > now()))",
    )
    .bind(user_id)
    .bind(&item.id)
    .bind(DURATION_PERMANENT)
    .bind(DURATION_MONTHLY)
    .fetch_optional(&mut *tx)
    .await?;
    if already_owned.is_some() {
        return Err(EngineError::Rejected("Você já possui este item.".into()));
    }

    wallet::debit(
        &mut tx,
        user_id,
        price,
        TxType::Loja,
        &format!("Compra: {}", item.name),
    )
    .await?;

    // Inline effects.
    match item.item_type.as_str() {
        ITEM_XP_BOOST => {
            let xp = item.xp_amount.unwrap_or(0);
            sqlx::query("UPDATE users SET xp = xp + $1 WHERE discord_id = $2")
                .bind(xp)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }
        ITEM_ROLE => {
            sqlx::query(
                "INSERT INTO pending_rewards (id, user_id, reward_type, role_id, reason)
                 VALUES ($1, $2, 'role', $3, $4)",
            )
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&item.role_id)
            .bind(format!("Compra na loja: {}", item.name))
            .execute(&mut *tx)
            .await?;
        }
        ITEM_AD_REMOVAL => {}
        other => {
            return Err(EngineError::Rejected(format!(
                "Tipo de item desconhecido: {other}"
            )));
        }
    }

    let expires_at = match item.duration.as_deref() {
        Some(DURATION_MONTHLY) => {
            let days = item.duration_days.unwrap_or(30) as i64;
            Some(Utc::now() + Duration::days(days))
        }
        _ => None,
    };

    let code = unique_redemption_code(&mut tx).await?;
    sqlx::query(
        "INSERT INTO user_inventory
             (id, user_id, item_id, item_name, price_paid, item_type, item_duration,
              redemption_code, is_redeemed, expires_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, $9)",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&item.id)
    .bind(&item.name)
    .bind(price)
    .bind(&item.item_type)
    .bind(&item.duration)
    .bind(&code)
    .bind(expires_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(PurchaseReceipt {
        item_id: item.id,
        item_name: item.name,
        price_paid: price,
        redemption_code: (item.item_type == ITEM_ROLE).then_some(code),
        expires_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn vip_discount_applies_to_non_role_items() {
        assert_eq!(effective_price(250_000, ITEM_XP_BOOST, true), 225_000);
        assert_eq!(effective_price(250_000, ITEM_XP_BOOST, false), 250_000);
    }

    #[test]
    fn role_items_never_discounted() {
        assert_eq!(effective_price(1_000_000, ITEM_ROLE, true), 1_000_000);
    }

    #[test]
    fn discount_rounds_to_centavo() {
        // 10% off 555 centavos -> 499.5 -> 500
        assert_eq!(effective_price(555, ITEM_AD_REMOVAL, true), 500);
    }

    #[test]
    fn codes_have_the_expected_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let code = generate_code(&mut rng);
        assert!(code.starts_with("FB-"));
        assert_eq!(code.len(), 11);
        assert!(code[3..].chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(!code[3..].chars().any(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn codes_vary_between_draws() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = generate_code(&mut rng);
        let b = generate_code(&mut rng);
        assert_ne!(a, b);
    }
}
