use actix_web::{get, post, web, HttpResponse, Responder};
use engine::store::{bolao, matches, resolver, settings, wallet};
use engine::types::match_types::MatchIngest;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::types::admin_types::{CreateBolaoInput, DepositInput};
use crate::utils::responses::engine_error_response;

#[post("/admin/matches/ingest")]
pub async fn ingest_match(pool: web::Data<PgPool>, body: web::Json<MatchIngest>) -> impl Responder {
    match matches::ingest_match(pool.get_ref(), &body).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": format!("Partida {} atualizada.", body.fixture_id)
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[post("/admin/matches/{fixture_id}/resolve")]
pub async fn resolve_match(pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let fixture_id = path.into_inner();

    match resolver::resolve_match(pool.get_ref(), fixture_id).await {
        Ok(outcome) if outcome.already_processed => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": format!("A partida {fixture_id} já foi processada."),
            "data": outcome
        })),
        Ok(outcome) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": format!(
                "Partida {fixture_id} resolvida. {} apostas foram finalizadas.",
                outcome.settled
            ),
            "data": outcome
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[post("/admin/matches/process-finished")]
pub async fn process_finished_matches(pool: web::Data<PgPool>) -> impl Responder {
    match resolver::process_all_finished_matches(pool.get_ref()).await {
        Ok(summary) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": summary
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[post("/admin/boloes")]
pub async fn create_bolao(
    pool: web::Data<PgPool>,
    body: web::Json<CreateBolaoInput>,
) -> impl Responder {
    if let Err(e) = body.validate() {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": e.to_string()
        }));
    }

    match bolao::create_bolao(pool.get_ref(), body.match_id).await {
        Ok(row) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Bolão criado com sucesso!",
            "data": row
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[post("/admin/boloes/{bolao_id}/cancel")]
pub async fn cancel_bolao(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> impl Responder {
    let bolao_id = path.into_inner();

    match bolao::cancel_bolao(pool.get_ref(), bolao_id).await {
        Ok(refunded) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": format!("Bolão cancelado. {refunded} participantes reembolsados.")
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[post("/admin/deposit")]
pub async fn admin_deposit(
    pool: web::Data<PgPool>,
    body: web::Json<DepositInput>,
) -> impl Responder {
    if let Err(e) = body.validate() {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": e.to_string()
        }));
    }

    let description = body.description.as_deref().unwrap_or("Depósito administrativo");

    match wallet::deposit(pool.get_ref(), &body.user_id, body.amount, description).await {
        Ok(balance) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": { "balance": balance }
        })),
        Err(e) => engine_error_response(&e),
    }
}

/// Hands the external fetcher the next usable provider key. Responds
/// 429 when the whole pool is exhausted for the day.
#[get("/admin/provider-key")]
pub async fn get_provider_key(pool: web::Data<PgPool>) -> impl Responder {
    match settings::next_api_key(pool.get_ref()).await {
        Ok(Some(api_key)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": { "api_key": api_key }
        })),
        Ok(None) => HttpResponse::TooManyRequests().json(json!({
            "status": "error",
            "message": "Todas as chaves da API atingiram o limite diário."
        })),
        Err(e) => engine_error_response(&e),
    }
}
