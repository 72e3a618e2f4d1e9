use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
    appointments, availability,
    availability::NewAppointment,
    error::ApiError,
    identity::Caller,
    models::Status,
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentBody {
    pub client_id: String,
    pub barber_id: String,
    pub service_id: String,
    pub date: String,
    pub time: String,
    pub status: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub product_ids: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentBody {
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFilter {
    pub barber_id: Option<String>,
    pub client_id: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/appointments")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    )
    .service(
        web::resource("/appointments/{id}")
            .route(web::get().to(find))
            .route(web::patch().to(update))
            .route(web::delete().to(cancel)),
    );
}

fn parse_status(value: Option<&str>) -> Result<Option<Status>, ApiError> {
    match value {
        None => Ok(None),
        Some(raw) => Status::parse(raw).map(Some).ok_or(ApiError::Validation {
            field: "status",
            message: "expected pending, confirmed, completed, or cancelled",
        }),
    }
}

async fn create(
    state: web::Data<AppState>,
    caller: Caller,
    body: web::Json<CreateAppointmentBody>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let status = parse_status(body.status.as_deref())?;

    let appointment = availability::create_appointment(
        &state.db,
        NewAppointment {
            client_id: body.client_id,
            barber_id: body.barber_id,
            service_id: body.service_id,
            date: body.date,
            time: body.time,
            status,
            notes: body.notes,
            product_ids: body.product_ids,
        },
    )
    .await?;

    log::info!(
        "caller {} booked appointment {} ({} {} with barber {})",
        caller.id,
        appointment.id,
        appointment.date,
        appointment.time,
        appointment.barber_id
    );

    Ok(HttpResponse::Created().json(appointment))
}

// Public: guests browse a barber's schedule to pick a free slot.
async fn list(
    state: web::Data<AppState>,
    query: web::Query<AppointmentFilter>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let appointments = if let Some(barber_id) = query.barber_id.as_deref() {
        appointments::list_by_barber(&state.db, barber_id).await?
    } else if let Some(client_id) = query.client_id.as_deref() {
        appointments::list_by_client(&state.db, client_id).await?
    } else {
        appointments::list_all(&state.db).await?
    };
    Ok(HttpResponse::Ok().json(appointments))
}

async fn find(
    state: web::Data<AppState>,
    _caller: Caller,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let appointment = appointments::find_by_id(&state.db, &id)
        .await?
        .ok_or(ApiError::NotFound("appointment"))?;
    Ok(HttpResponse::Ok().json(appointment))
}

async fn update(
    state: web::Data<AppState>,
    _caller: Caller,
    path: web::Path<String>,
    body: web::Json<UpdateAppointmentBody>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let status = parse_status(body.status.as_deref())?;

    let appointment =
        appointments::update_status(&state.db, &id, status, body.notes.as_deref()).await?;
    Ok(HttpResponse::Ok().json(appointment))
}

async fn cancel(
    state: web::Data<AppState>,
    caller: Caller,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let appointment = appointments::cancel(&state.db, &id).await?;
    log::info!("caller {} cancelled appointment {id}", caller.id);
    Ok(HttpResponse::Ok().json(appointment))
}
