//! Availability Resolver: the single source of truth for whether a
//! (barber, date, time) slot can take a new appointment, and the only
//! path that creates one.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    appointments, blocks, clock,
    db::new_id,
    directory,
    error::ApiError,
    inventory,
    models::{Appointment, Status},
};

/// Booking request as accepted by [`create_appointment`].
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub client_id: String,
    pub barber_id: String,
    pub service_id: String,
    pub date: String,
    pub time: String,
    pub status: Option<Status>,
    pub notes: Option<String>,
    pub product_ids: Vec<String>,
}

fn validate_slot(date: &str, time: &str) -> Result<chrono::NaiveDateTime, ApiError> {
    clock::parse_slot(date, time).ok_or(ApiError::Validation {
        field: "date/time",
        message: "expected YYYY-MM-DD and HH:MM",
    })
}

/// Read-only availability check. Fails closed: a slot in the past, a
/// matching block, or an active appointment all make it unavailable.
pub async fn is_available(
    pool: &SqlitePool,
    barber_id: &str,
    date: &str,
    time: &str,
) -> Result<bool, ApiError> {
    let slot = validate_slot(date, time)?;
    let (date, time) = clock::canonical(slot);
    if clock::is_past(slot) {
        return Ok(false);
    }
    if blocks::slot_blocked(pool, barber_id, &date, &time).await? {
        return Ok(false);
    }
    if appointments::slot_taken(pool, barber_id, &date, &time).await? {
        return Ok(false);
    }
    Ok(true)
}

/// Books a slot. The availability pre-check gives clean errors for
/// past, blocked, and visibly occupied slots; the unique index on the
/// active slot tuple is what actually guarantees at most one active
/// appointment per slot when two requests race.
pub async fn create_appointment(
    pool: &SqlitePool,
    req: NewAppointment,
) -> Result<Appointment, ApiError> {
    let slot = validate_slot(&req.date, &req.time)?;
    let (date, time) = clock::canonical(slot);

    directory::expect_client(pool, &req.client_id).await?;
    directory::expect_barber(pool, &req.barber_id).await?;
    directory::expect_service(pool, &req.service_id).await?;

    if !is_available(pool, &req.barber_id, &date, &time).await? {
        return Err(ApiError::SlotUnavailable);
    }

    let id = new_id();
    let status = req.status.unwrap_or(Status::Pending);
    let created_at = Utc::now().to_rfc3339();

    appointments::insert(
        pool,
        &id,
        &req.client_id,
        &req.barber_id,
        &req.service_id,
        &date,
        &time,
        status,
        req.notes.as_deref(),
        &created_at,
    )
    .await?;

    // Best effort, one unit per attached product. The appointment
    // stands even when stock bookkeeping fails.
    for product_id in &req.product_ids {
        if let Err(err) = inventory::decrement_stock(pool, product_id, 1).await {
            log::warn!("appointment {id}: {err}");
        }
    }

    appointments::find_by_id(pool, &id)
        .await?
        .ok_or(ApiError::NotFound("appointment"))
}
