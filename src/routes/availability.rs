use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{availability, error::ApiError, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub barber_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/availability").route(web::get().to(check)));
}

async fn check(
    state: web::Data<AppState>,
    query: web::Query<AvailabilityQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let (Some(barber_id), Some(date), Some(time)) = (query.barber_id, query.date, query.time)
    else {
        return Err(ApiError::Validation {
            field: "barberId/date/time",
            message: "all three query parameters are required",
        });
    };
    let available = availability::is_available(&state.db, &barber_id, &date, &time).await?;
    Ok(HttpResponse::Ok().json(json!({ "available": available })))
}
