use actix_web::HttpResponse;
use engine::EngineError;
use serde_json::json;

/// Maps an engine error to the `{status, message}` envelope. Database
/// errors are logged and hidden behind a generic message.
pub fn engine_error_response(err: &EngineError) -> HttpResponse {
    match err {
        EngineError::Invalid(msg) | EngineError::Rejected(msg) => {
            HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": msg
            }))
        }
        EngineError::InsufficientFunds => HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": err.to_string()
        })),
        EngineError::NotFound(msg) => HttpResponse::NotFound().json(json!({
            "status": "error",
            "message": msg
        })),
        EngineError::Database(db_err) => {
            log::error!("database error: {db_err}");
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Ocorreu um erro inesperado. Tente novamente."
            }))
        }
    }
}
