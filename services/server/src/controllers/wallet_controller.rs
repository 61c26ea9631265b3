use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use engine::store::wallet;
use serde_json::json;
use sqlx::PgPool;

use crate::utils::jwt::extract_user;
use crate::utils::responses::engine_error_response;

#[get("/wallet")]
pub async fn get_wallet(req: HttpRequest, pool: web::Data<PgPool>) -> impl Responder {
    let user = match extract_user(&req) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match wallet::get_wallet(pool.get_ref(), &user.id).await {
        Ok(wallet) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": wallet
        })),
        Err(e) => engine_error_response(&e),
    }
}
