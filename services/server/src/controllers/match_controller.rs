use actix_web::{get, web, HttpResponse, Responder};
use engine::store::matches;
use serde_json::json;
use sqlx::PgPool;

use crate::utils::responses::engine_error_response;

#[get("/matches")]
pub async fn get_matches(pool: web::Data<PgPool>) -> impl Responder {
    match matches::list_open_matches(pool.get_ref()).await {
        Ok(rows) => {
            let data: Vec<_> = rows
                .into_iter()
                .map(|m| {
                    json!({
                        "fixture_id": m.id,
                        "home_team": m.home_team,
                        "away_team": m.away_team,
                        "league": m.league,
                        "kickoff": m.kickoff,
                        "status": m.status,
                        "markets": m.markets,
                    })
                })
                .collect();
            HttpResponse::Ok().json(json!({
                "status": "success",
                "data": data
            }))
        }
        Err(e) => engine_error_response(&e),
    }
}

#[get("/matches/{fixture_id}")]
pub async fn get_match_by_id(pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let fixture_id = path.into_inner();

    match matches::get_match(pool.get_ref(), fixture_id).await {
        Ok(Some(m)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": {
                "fixture_id": m.id,
                "home_team": m.home_team,
                "away_team": m.away_team,
                "league": m.league,
                "kickoff": m.kickoff,
                "status": m.status,
                "home_goals": m.home_goals,
                "away_goals": m.away_goals,
                "markets": m.markets,
                "is_finished": m.is_finished,
            }
        })),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "status": "error",
            "message": "Partida não encontrada."
        })),
        Err(e) => engine_error_response(&e),
    }
}
