//! Blocking Store: barber-initiated unavailability records.
//!
//! Blocks are independent of appointments. Duplicates for the same
//! slot are permitted; availability only asks whether at least one
//! exists. There is no update: a block is replaced by delete-and-
//! recreate.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{clock, db::new_id, error::ApiError, models::Block};

// Blocks must land in the same canonical spelling the availability
// lookups compare against, or they would never hide their slot.
fn canonical_slot(date: &str, time: &str) -> Result<(String, String), ApiError> {
    let slot = clock::parse_slot(date, time).ok_or(ApiError::Validation {
        field: "date/time",
        message: "expected YYYY-MM-DD and HH:MM",
    })?;
    Ok(clock::canonical(slot))
}

pub async fn create_block(
    pool: &SqlitePool,
    barber_id: &str,
    date: &str,
    time: &str,
    motivo: Option<&str>,
) -> Result<Block, ApiError> {
    let (date, time) = canonical_slot(date, time)?;
    let id = new_id();
    let created_at = Utc::now().to_rfc3339();

    sqlx::query(
        r#"INSERT INTO blocks (id, barber_id, date, time, motivo, created_at)
           VALUES (?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&id)
    .bind(barber_id)
    .bind(&date)
    .bind(&time)
    .bind(motivo)
    .bind(&created_at)
    .execute(pool)
    .await?;

    Ok(Block {
        id,
        barber_id: barber_id.to_string(),
        date,
        time,
        motivo: motivo.map(str::to_string),
        created_at,
    })
}

pub async fn list_blocks(
    pool: &SqlitePool,
    barber_id: Option<&str>,
) -> Result<Vec<Block>, ApiError> {
    let rows = match barber_id {
        Some(barber_id) => {
            sqlx::query_as::<_, Block>(
                r#"SELECT id, barber_id, date, time, motivo, created_at
                   FROM blocks
                   WHERE barber_id = ?
                   ORDER BY date DESC, time DESC"#,
            )
            .bind(barber_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Block>(
                r#"SELECT id, barber_id, date, time, motivo, created_at
                   FROM blocks
                   ORDER BY date DESC, time DESC"#,
            )
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}

/// Deletes a block by id. Deleting an absent id is a no-op.
pub async fn remove_block(pool: &SqlitePool, id: &str) -> Result<(), ApiError> {
    sqlx::query("DELETE FROM blocks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Deletes every block matching the slot exactly; the "unblock this
/// slot" shortcut.
pub async fn remove_block_by_slot(
    pool: &SqlitePool,
    barber_id: &str,
    date: &str,
    time: &str,
) -> Result<(), ApiError> {
    let (date, time) = canonical_slot(date, time)?;
    sqlx::query("DELETE FROM blocks WHERE barber_id = ? AND date = ? AND time = ?")
        .bind(barber_id)
        .bind(date)
        .bind(time)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn slot_blocked(
    pool: &SqlitePool,
    barber_id: &str,
    date: &str,
    time: &str,
) -> Result<bool, ApiError> {
    let (date, time) = canonical_slot(date, time)?;
    let blocked = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM blocks WHERE barber_id = ? AND date = ? AND time = ?)",
    )
    .bind(barber_id)
    .bind(date)
    .bind(time)
    .fetch_one(pool)
    .await?;
    Ok(blocked)
}
