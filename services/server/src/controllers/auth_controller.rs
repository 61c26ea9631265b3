use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use std::env;
use validator::Validate;

use crate::types::auth_types::TokenRequest;
use crate::utils::jwt::create_jwt;

/// Exchanges the shared bot secret for a user-scoped JWT. Upserts the
/// user row so wallet and bet foreign keys always have a target, and
/// reads the admin/vip flags from the database rather than the caller.
#[post("/auth/token")]
pub async fn issue_token(pool: web::Data<PgPool>, body: web::Json<TokenRequest>) -> impl Responder {
    if let Err(e) = body.validate() {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": e.to_string()
        }));
    }

    let bot_secret = match env::var("BOT_API_SECRET") {
        Ok(secret) => secret,
        Err(_) => {
            return HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Bot secret not configured"
            }));
        }
    };
    if body.bot_secret != bot_secret {
        return HttpResponse::Unauthorized().json(json!({
            "status": "error",
            "message": "Invalid bot secret"
        }));
    }

    let flags: Result<(bool, bool), sqlx::Error> = sqlx::query_as(
        "INSERT INTO users (discord_id, name) VALUES ($1, $2)
         ON CONFLICT (discord_id) DO UPDATE SET name = EXCLUDED.name
         RETURNING is_admin, is_vip",
    )
    .bind(&body.user_id)
    .bind(&body.name)
    .fetch_one(pool.get_ref())
    .await;

    let (is_admin, is_vip) = match flags {
        Ok(flags) => flags,
        Err(e) => {
            log::error!("failed to upsert user {}: {e}", body.user_id);
            return HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Ocorreu um erro inesperado. Tente novamente."
            }));
        }
    };

    let jwt_secret = match env::var("JWT_SECRET") {
        Ok(secret) => secret,
        Err(_) => {
            return HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "JWT secret not configured"
            }));
        }
    };

    match create_jwt(&body.user_id, is_admin, is_vip, &jwt_secret) {
        Ok(token) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": { "token": token }
        })),
        Err(e) => {
            log::error!("failed to sign token for {}: {e}", body.user_id);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to create token"
            }))
        }
    }
}
