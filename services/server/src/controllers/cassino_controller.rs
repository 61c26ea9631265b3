use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use engine::store::cassino;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::types::cassino_types::{CashOutInput, CassinoBetInput};
use crate::utils::jwt::extract_user;
use crate::utils::responses::engine_error_response;

const RECENT_CRASHES_LIMIT: i64 = 20;

#[get("/cassino/recent")]
pub async fn get_recent_crashes(pool: web::Data<PgPool>) -> impl Responder {
    match cassino::get_recent_crashes(pool.get_ref(), RECENT_CRASHES_LIMIT).await {
        Ok(points) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": points
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[post("/cassino/bets")]
pub async fn place_cassino_bet(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    body: web::Json<CassinoBetInput>,
) -> impl Responder {
    if let Err(e) = body.validate() {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": e.to_string()
        }));
    }

    let user = match extract_user(&req) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match cassino::place_cassino_bet(pool.get_ref(), &user.id, body.stake).await {
        Ok(placed) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": placed
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[post("/cassino/bets/{bet_id}/cashout")]
pub async fn cash_out_cassino_bet(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<CashOutInput>,
) -> impl Responder {
    if let Err(e) = body.validate() {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": e.to_string()
        }));
    }

    let user = match extract_user(&req) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    let bet_id = path.into_inner();

    match cassino::cash_out_cassino(pool.get_ref(), &user.id, bet_id, body.multiplier).await {
        Ok(outcome) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": outcome
        })),
        Err(e) => engine_error_response(&e),
    }
}
