//! Stock side-effect hook. Decrements run after the appointment has
//! committed and are fire-and-forget from the booking's perspective:
//! a failed decrement never fails or rolls back the booking.

use sqlx::SqlitePool;

use crate::error::ApiError;

/// Decrements a product's stock, refusing to go negative. Zero rows
/// affected means the product is unknown or out of stock.
pub async fn decrement_stock(
    pool: &SqlitePool,
    product_id: &str,
    amount: i64,
) -> Result<(), ApiError> {
    let result = sqlx::query("UPDATE products SET stock = stock - ? WHERE id = ? AND stock >= ?")
        .bind(amount)
        .bind(product_id)
        .bind(amount)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::StockDecrement(product_id.to_string()));
    }
    Ok(())
}
