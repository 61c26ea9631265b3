use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use engine::store::bets;
use engine::types::bet_types::SelectionInput;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::types::bet_types::PlaceBetInput;
use crate::utils::jwt::extract_user;
use crate::utils::responses::engine_error_response;

#[post("/bets")]
pub async fn place_bet(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    body: web::Json<PlaceBetInput>,
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

    let selections: Vec<SelectionInput> = body
        .selections
        .iter()
        .map(|leg| SelectionInput {
            match_id: leg.match_id,
            market_name: leg.market_name.clone(),
            selection: leg.selection.clone(),
            odd_value: leg.odd_value,
        })
        .collect();

    match bets::place_bet(pool.get_ref(), &user.id, &selections, body.stake).await {
        Ok(placed) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Aposta realizada com sucesso!",
            "data": placed
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[get("/bets")]
pub async fn get_my_bets(req: HttpRequest, pool: web::Data<PgPool>) -> impl Responder {
    let user = match extract_user(&req) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match bets::get_user_bets(pool.get_ref(), &user.id).await {
        Ok(bets) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": bets
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[get("/me/stats")]
pub async fn get_my_stats(req: HttpRequest, pool: web::Data<PgPool>) -> impl Responder {
    let user = match extract_user(&req) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match bets::get_user_stats(pool.get_ref(), &user.id).await {
        Ok(stats) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": stats
        })),
        Err(e) => engine_error_response(&e),
    }
}
