use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use engine::store::{promo, shop};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::types::store_types::{PurchaseInput, RedeemInput};
use crate::utils::jwt::extract_user;
use crate::utils::responses::engine_error_response;

#[get("/store/items")]
pub async fn get_store_items(pool: web::Data<PgPool>) -> impl Responder {
    match shop::get_store_items(pool.get_ref()).await {
        Ok(items) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": items
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[get("/me/inventory")]
pub async fn get_my_inventory(req: HttpRequest, pool: web::Data<PgPool>) -> impl Responder {
    let user = match extract_user(&req) {
        Ok(user) => user,
        Err(resp) => return resp,
    };

    match shop::get_user_inventory(pool.get_ref(), &user.id).await {
        Ok(items) => HttpResponse::Ok().json(json!({
            "status": "success",
            "data": items
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[post("/store/purchase")]
pub async fn purchase_item(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    body: web::Json<PurchaseInput>,
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

    match shop::purchase_item(pool.get_ref(), &user.id, &body.item_id).await {
        Ok(receipt) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": format!("Você comprou \"{}\"!", receipt.item_name),
            "data": receipt
        })),
        Err(e) => engine_error_response(&e),
    }
}

#[post("/promo/redeem")]
pub async fn redeem_promo_code(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    body: web::Json<RedeemInput>,
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

    match promo::redeem_code(pool.get_ref(), &user.id, &body.code).await {
        Ok(message) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": message
        })),
        Err(e) => engine_error_response(&e),
    }
}
