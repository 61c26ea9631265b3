use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const ITEM_ROLE: &str = "ROLE";
pub const ITEM_XP_BOOST: &str = "XP_BOOST";
pub const ITEM_AD_REMOVAL: &str = "AD_REMOVAL";

pub const DURATION_PERMANENT: &str = "PERMANENT";
pub const DURATION_MONTHLY: &str = "MONTHLY";

pub const PROMO_ACTIVE: &str = "ACTIVE";
pub const PROMO_REDEEMED: &str = "REDEEMED";
pub const PROMO_EXPIRED: &str = "EXPIRED";

pub const PROMO_TYPE_MONEY: &str = "MONEY";
pub const PROMO_TYPE_DAILY: &str = "DAILY";
pub const PROMO_TYPE_XP: &str = "XP";
pub const PROMO_TYPE_ROLE: &str = "ROLE";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoreItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub item_type: String,
    pub duration: Option<String>,
    pub duration_days: Option<i32>,
    pub role_id: Option<String>,
    pub xp_amount: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InventoryItem {
    pub id: Uuid,
    pub user_id: String,
    pub item_id: String,
    pub item_name: String,
    pub price_paid: i64,
    pub item_type: String,
    pub item_duration: Option<String>,
    pub redemption_code: String,
    pub is_redeemed: bool,
    pub purchased_at: DateTime<Utc>,
    pub redeemed_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PromoCodeRow {
    pub code: String,
    pub promo_type: String,
    pub value: String,
    pub description: String,
    pub status: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseReceipt {
    pub item_id: String,
    pub item_name: String,
    pub price_paid: i64,
    pub redemption_code: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
