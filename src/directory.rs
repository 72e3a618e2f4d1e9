//! Read-only lookups against the client/barber/service directories.
//! A reference that does not resolve is a hard precondition failure
//! for booking.

use sqlx::SqlitePool;

use crate::error::ApiError;

async fn exists(pool: &SqlitePool, table: &str, id: &str) -> Result<bool, ApiError> {
    // Table names come from the callers below, never from input.
    let query = format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = ?)");
    let found = sqlx::query_scalar::<_, bool>(&query)
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(found)
}

pub async fn expect_client(pool: &SqlitePool, id: &str) -> Result<(), ApiError> {
    if exists(pool, "clients", id).await? {
        Ok(())
    } else {
        Err(ApiError::InvalidReference {
            kind: "client",
            id: id.to_string(),
        })
    }
}

/// Only active barbers are bookable; a deactivated barber no longer
/// resolves as a booking reference.
pub async fn expect_barber(pool: &SqlitePool, id: &str) -> Result<(), ApiError> {
    let found = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM barbers WHERE id = ? AND active = 1)",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if found {
        Ok(())
    } else {
        Err(ApiError::InvalidReference {
            kind: "barber",
            id: id.to_string(),
        })
    }
}

pub async fn expect_service(pool: &SqlitePool, id: &str) -> Result<(), ApiError> {
    if exists(pool, "services", id).await? {
        Ok(())
    } else {
        Err(ApiError::InvalidReference {
            kind: "service",
            id: id.to_string(),
        })
    }
}
