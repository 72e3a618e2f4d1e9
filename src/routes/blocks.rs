use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::{blocks, error::ApiError, identity::Staff, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlockBody {
    pub barber_id: String,
    pub date: String,
    pub time: String,
    pub motivo: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockFilter {
    pub barber_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotQuery {
    pub barber_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/blocks")
            .route(web::get().to(list))
            .route(web::post().to(create))
            .route(web::delete().to(remove_by_slot)),
    )
    .service(web::resource("/blocks/{id}").route(web::delete().to(remove)));
}

async fn create(
    state: web::Data<AppState>,
    staff: Staff,
    body: web::Json<CreateBlockBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let block = blocks::create_block(
        &state.db,
        &body.barber_id,
        &body.date,
        &body.time,
        body.motivo.as_deref(),
    )
    .await?;
    log::info!(
        "staff {} blocked {} {} for barber {}",
        staff.0.id,
        block.date,
        block.time,
        block.barber_id
    );
    Ok(HttpResponse::Created().json(block))
}

async fn list(
    state: web::Data<AppState>,
    query: web::Query<BlockFilter>,
) -> Result<HttpResponse, ApiError> {
    let blocks = blocks::list_blocks(&state.db, query.barber_id.as_deref()).await?;
    Ok(HttpResponse::Ok().json(blocks))
}

async fn remove(
    state: web::Data<AppState>,
    _staff: Staff,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    blocks::remove_block(&state.db, &id).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

async fn remove_by_slot(
    state: web::Data<AppState>,
    _staff: Staff,
    query: web::Query<SlotQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let (Some(barber_id), Some(date), Some(time)) = (query.barber_id, query.date, query.time)
    else {
        return Err(ApiError::Validation {
            field: "barberId/date/time",
            message: "all three query parameters are required",
        });
    };
    blocks::remove_block_by_slot(&state.db, &barber_id, &date, &time).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
