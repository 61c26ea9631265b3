mod controllers;
mod middleware;
mod types;
mod utils;

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::env;

use crate::controllers::admin_controller::{
    admin_deposit, cancel_bolao, create_bolao, get_provider_key, ingest_match,
    process_finished_matches, resolve_match,
};
use crate::controllers::auth_controller::issue_token;
use crate::controllers::bet_controller::{get_my_bets, get_my_stats, place_bet};
use crate::controllers::bolao_controller::{get_boloes, join_bolao};
use crate::controllers::cassino_controller::{
    cash_out_cassino_bet, get_recent_crashes, place_cassino_bet,
};
use crate::controllers::match_controller::{get_match_by_id, get_matches};
use crate::controllers::store_controller::{
    get_my_inventory, get_store_items, purchase_item, redeem_promo_code,
};
use crate::controllers::wallet_controller::get_wallet;
use crate::middleware::admin::AdminMiddleware;
use crate::middleware::auth::AuthMiddleware;

async fn health() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(r#"{"status": "Ok"}"#)
}

async fn run() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");

    log::info!("Connected to Postgres");

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());

    HttpServer::new(move || {
        let public_scope = web::scope("")
            .service(issue_token)
            .service(get_matches)
            .service(get_match_by_id)
            .service(get_boloes)
            .service(get_recent_crashes)
            .service(get_store_items)
            .route("/health", web::get().to(health));

        let protected_scope = web::scope("")
            .wrap(AuthMiddleware)
            .service(get_wallet)
            .service(place_bet)
            .service(get_my_bets)
            .service(get_my_stats)
            .service(join_bolao)
            .service(place_cassino_bet)
            .service(cash_out_cassino_bet)
            .service(get_my_inventory)
            .service(purchase_item)
            .service(redeem_promo_code);

        // AdminMiddleware reads the claims AuthMiddleware inserts, so
        // auth must be the outer wrap.
        let admin_scope = web::scope("")
            .wrap(AdminMiddleware)
            .wrap(AuthMiddleware)
            .service(ingest_match)
            .service(resolve_match)
            .service(process_finished_matches)
            .service(create_bolao)
            .service(cancel_bolao)
            .service(admin_deposit)
            .service(get_provider_key);

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .service(public_scope)
            .service(protected_scope)
            .service(admin_scope)
    })
    .bind(&bind_addr)?
    .run()
    .await
}

fn main() -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime");
    runtime.block_on(run())
}
