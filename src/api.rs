use actix_web::web;

pub mod enrollment_hook;
pub mod health;

pub const ENROLLMENT_EVENT_PATH: &str = "/webhook/event";

/// Route table. The enrollment webhook answers GET and POST only, anything
/// else gets a 405 from the resource. CSRF protection doesn't apply to this
/// server (no cookies or sessions), and the route is unauthenticated.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::ping)
        .service(web::resource(ENROLLMENT_EVENT_PATH)
            .route(web::get().to(enrollment_hook::enrollment_event))
            .route(web::post().to(enrollment_hook::enrollment_event))
        );
}
