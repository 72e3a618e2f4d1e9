pub mod appointments;
pub mod availability;
pub mod blocks;

use actix_web::{web, HttpResponse};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)));
    availability::configure(cfg);
    appointments::configure(cfg);
    blocks::configure(cfg);
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}
