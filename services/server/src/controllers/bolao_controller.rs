use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use engine::store::bolao;
use engine::types::bolao_types::ScoreGuess;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::types::bolao_types::JoinBolaoInput;
use crate::utils::jwt::extract_user;
use crate::utils::responses::engine_error_response;

#[get("/boloes")]
pub async fn get_boloes(pool: web::Data<PgPool>) -> impl Responder {
    match bolao::get_active_boloes(pool.get_ref()).await {
        Ok(boloes) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": boloes
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[post("/bolao/{bolao_id}/join")]
pub async fn join_bolao(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    body: web::Json<JoinBolaoInput>,
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

    let bolao_id = path.into_inner();
    let guess = ScoreGuess {
        home: body.guess_home,
        away: body.guess_away,
    };

    match bolao::join_bolao(pool.get_ref(), &user.id, bolao_id, guess).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Palpite registrado com sucesso!"
        })),
        Err(e) => engine_error_response(&e),
    }
}
