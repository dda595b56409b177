use actix_web::{get, HttpResponse, Responder, web};
use log::error;

use crate::data_structs::responses::error_response::ErrorResponse;
use crate::SharedResources;

#[get("/ping")]
pub async fn ping(data: web::Data<SharedResources>) -> impl Responder {
    // answers only when the store does, so it doubles as a readiness probe
    match data.store.ping().await {
        Ok(_) => HttpResponse::Ok().body("Pong!"),
        Err(err) => {
            error!("Health check failed: {}", err);
            HttpResponse::ServiceUnavailable()
                .json(ErrorResponse::new("store_unavailable", "enrollment store unavailable".to_string()))
        }
    }
}
