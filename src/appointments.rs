//! Appointment Store: committed reservations.
//!
//! Appointments are never hard-deleted; cancellation is a status
//! transition. Identifying fields (client, barber, service, date,
//! time) never change after creation.

use sqlx::SqlitePool;

use crate::{
    error::ApiError,
    models::{Appointment, AppointmentRow, Status},
};

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Inserts a new appointment row. A unique violation on the active
/// slot index means a concurrent booking won the slot, which surfaces
/// as `SlotUnavailable` just like a failed pre-check.
#[allow(clippy::too_many_arguments)]
pub async fn insert(
    pool: &SqlitePool,
    id: &str,
    client_id: &str,
    barber_id: &str,
    service_id: &str,
    date: &str,
    time: &str,
    status: Status,
    notes: Option<&str>,
    created_at: &str,
) -> Result<(), ApiError> {
    let result = sqlx::query(
        r#"INSERT INTO appointments
           (id, client_id, barber_id, service_id, date, time, status, notes, created_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(id)
    .bind(client_id)
    .bind(barber_id)
    .bind(service_id)
    .bind(date)
    .bind(time)
    .bind(status)
    .bind(notes)
    .bind(created_at)
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(err) if is_unique_violation(&err) => Err(ApiError::SlotUnavailable),
        Err(err) => Err(err.into()),
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Appointment>, ApiError> {
    let row = sqlx::query_as::<_, AppointmentRow>(
        r#"SELECT a.id, a.client_id, a.barber_id, a.service_id, a.date, a.time,
                  a.status, a.notes, a.created_at,
                  c.name AS client_name, b.name AS barber_name, s.name AS service_name
           FROM appointments a
           INNER JOIN clients c ON a.client_id = c.id
           INNER JOIN barbers b ON a.barber_id = b.id
           INNER JOIN services s ON a.service_id = s.id
           WHERE a.id = ?
           LIMIT 1"#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Appointment::from))
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Appointment>, ApiError> {
    let rows = sqlx::query_as::<_, AppointmentRow>(
        r#"SELECT a.id, a.client_id, a.barber_id, a.service_id, a.date, a.time,
                  a.status, a.notes, a.created_at,
                  c.name AS client_name, b.name AS barber_name, s.name AS service_name
           FROM appointments a
           INNER JOIN clients c ON a.client_id = c.id
           INNER JOIN barbers b ON a.barber_id = b.id
           INNER JOIN services s ON a.service_id = s.id
           ORDER BY a.date DESC, a.time DESC"#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Appointment::from).collect())
}

pub async fn list_by_barber(
    pool: &SqlitePool,
    barber_id: &str,
) -> Result<Vec<Appointment>, ApiError> {
    let rows = sqlx::query_as::<_, AppointmentRow>(
        r#"SELECT a.id, a.client_id, a.barber_id, a.service_id, a.date, a.time,
                  a.status, a.notes, a.created_at,
                  c.name AS client_name, b.name AS barber_name, s.name AS service_name
           FROM appointments a
           INNER JOIN clients c ON a.client_id = c.id
           INNER JOIN barbers b ON a.barber_id = b.id
           INNER JOIN services s ON a.service_id = s.id
           WHERE a.barber_id = ?
           ORDER BY a.date DESC, a.time DESC"#,
    )
    .bind(barber_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Appointment::from).collect())
}

pub async fn list_by_client(
    pool: &SqlitePool,
    client_id: &str,
) -> Result<Vec<Appointment>, ApiError> {
    let rows = sqlx::query_as::<_, AppointmentRow>(
        r#"SELECT a.id, a.client_id, a.barber_id, a.service_id, a.date, a.time,
                  a.status, a.notes, a.created_at,
                  c.name AS client_name, b.name AS barber_name, s.name AS service_name
           FROM appointments a
           INNER JOIN clients c ON a.client_id = c.id
           INNER JOIN barbers b ON a.barber_id = b.id
           INNER JOIN services s ON a.service_id = s.id
           WHERE a.client_id = ?
           ORDER BY a.date DESC, a.time DESC"#,
    )
    .bind(client_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Appointment::from).collect())
}

/// Updates status and/or notes. Returns the joined appointment, or
/// `NotFound` when the id does not exist.
pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    status: Option<Status>,
    notes: Option<&str>,
) -> Result<Appointment, ApiError> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(ApiError::NotFound("appointment"));
    }

    if let Some(status) = status {
        // Reactivating a terminal appointment re-enters the active
        // slot index and can collide with a booking made meanwhile.
        let result = sqlx::query("UPDATE appointments SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(pool)
            .await;
        match result {
            Ok(_) => {}
            Err(err) if is_unique_violation(&err) => return Err(ApiError::SlotUnavailable),
            Err(err) => return Err(err.into()),
        }
    }
    if let Some(notes) = notes {
        sqlx::query("UPDATE appointments SET notes = ? WHERE id = ?")
            .bind(notes)
            .bind(id)
            .execute(pool)
            .await?;
    }

    find_by_id(pool, id)
        .await?
        .ok_or(ApiError::NotFound("appointment"))
}

/// Soft-cancels an appointment, freeing its slot.
pub async fn cancel(pool: &SqlitePool, id: &str) -> Result<Appointment, ApiError> {
    update_status(pool, id, Some(Status::Cancelled), None).await
}

/// True when a non-terminal appointment occupies the slot.
pub async fn slot_taken(
    pool: &SqlitePool,
    barber_id: &str,
    date: &str,
    time: &str,
) -> Result<bool, ApiError> {
    let taken = sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS (
               SELECT 1 FROM appointments
               WHERE barber_id = ? AND date = ? AND time = ?
                 AND status NOT IN ('cancelled', 'completed')
           )"#,
    )
    .bind(barber_id)
    .bind(date)
    .bind(time)
    .fetch_one(pool)
    .await?;
    Ok(taken)
}
