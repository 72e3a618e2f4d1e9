#![allow(dead_code)]

use chrono::{Duration, Local, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use fadebook::availability::NewAppointment;

pub const BARBER: &str = "b1";
pub const OTHER_BARBER: &str = "b2";
pub const INACTIVE_BARBER: &str = "b3";
pub const CLIENT: &str = "c1";
pub const OTHER_CLIENT: &str = "c2";
pub const SERVICE: &str = "s1";
pub const PRODUCT: &str = "p1";
pub const EMPTY_PRODUCT: &str = "p0";

/// Single-connection in-memory pool with migrations applied.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory pool");
    fadebook::db::run_migrations(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

/// Seeds the client/barber/service directories and two products
/// (one with stock, one exhausted).
pub async fn seed_directory(pool: &SqlitePool) {
    let now = Utc::now().to_rfc3339();

    for (id, name) in [(CLIENT, "Carla Soto"), (OTHER_CLIENT, "Luis Mena")] {
        sqlx::query("INSERT INTO clients (id, name, created_at) VALUES (?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(&now)
            .execute(pool)
            .await
            .expect("failed to seed client");
    }

    for (id, name, active) in [
        (BARBER, "Rodrigo Vega", 1_i64),
        (OTHER_BARBER, "Ana Prieto", 1),
        (INACTIVE_BARBER, "Pedro Salas", 0),
    ] {
        sqlx::query("INSERT INTO barbers (id, name, active, created_at) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(active)
            .bind(&now)
            .execute(pool)
            .await
            .expect("failed to seed barber");
    }

    sqlx::query(
        "INSERT INTO services (id, name, duration_min, price_cents, created_at) VALUES (?, ?, 45, 3500, ?)",
    )
    .bind(SERVICE)
    .bind("Signature Cut")
    .bind(&now)
    .execute(pool)
    .await
    .expect("failed to seed service");

    for (id, name, stock) in [(PRODUCT, "Matte Pomade", 3_i64), (EMPTY_PRODUCT, "Beard Oil", 0)] {
        sqlx::query(
            "INSERT INTO products (id, name, stock, price_cents, created_at) VALUES (?, ?, ?, 1500, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(stock)
        .bind(&now)
        .execute(pool)
        .await
        .expect("failed to seed product");
    }
}

/// A date comfortably in the future, so past-slot rejection never
/// interferes with booking tests.
pub fn future_date() -> String {
    (Local::now().date_naive() + Duration::days(7))
        .format("%Y-%m-%d")
        .to_string()
}

pub fn booking(client_id: &str, barber_id: &str, date: &str, time: &str) -> NewAppointment {
    NewAppointment {
        client_id: client_id.to_string(),
        barber_id: barber_id.to_string(),
        service_id: SERVICE.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        status: None,
        notes: None,
        product_ids: Vec::new(),
    }
}

pub async fn product_stock(pool: &SqlitePool, product_id: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT stock FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .expect("failed to read stock")
}
