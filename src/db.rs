use std::{env, fs, path::Path};

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub fn ensure_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    let path = if let Some(path) = db_url.strip_prefix("sqlite://") {
        Some(path)
    } else if let Some(path) = db_url.strip_prefix("sqlite:") {
        Some(path)
    } else {
        None
    };

    let Some(path) = path else {
        return Ok(());
    };

    let path = path.split('?').next().unwrap_or(path);
    if path == ":memory:" || path.is_empty() {
        return Ok(());
    }

    let path = path.strip_prefix("file:").unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub async fn seed_defaults(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    seed_services(pool).await?;
    seed_demo(pool).await?;
    Ok(())
}

async fn seed_services(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let existing = sqlx::query_as::<_, (String,)>("SELECT id FROM services LIMIT 1")
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let catalog: [(&str, i64, i64); 4] = [
        ("Signature Cut", 45, 3500),
        ("Fade & Line-Up", 35, 3000),
        ("Beard Sculpt", 25, 2000),
        ("Full Grooming", 60, 5000),
    ];

    for (name, duration_min, price_cents) in catalog {
        sqlx::query(
            r#"INSERT INTO services (id, name, duration_min, price_cents, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(new_id())
        .bind(name)
        .bind(duration_min)
        .bind(price_cents)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;
    }

    Ok(())
}

async fn seed_demo(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let demo = env::var("SEED_DEMO").unwrap_or_else(|_| "false".to_string());
    if demo != "true" {
        return Ok(());
    }

    let existing = sqlx::query_as::<_, (String,)>("SELECT id FROM barbers LIMIT 1")
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    log::warn!("SEED_DEMO=true: seeding demo barber, client, and products");

    let now = Utc::now().to_rfc3339();
    sqlx::query("INSERT INTO barbers (id, name, active, created_at) VALUES (?, ?, 1, ?)")
        .bind(new_id())
        .bind("Demo Barber")
        .bind(&now)
        .execute(pool)
        .await?;
    sqlx::query("INSERT INTO clients (id, name, created_at) VALUES (?, ?, ?)")
        .bind(new_id())
        .bind("Demo Client")
        .bind(&now)
        .execute(pool)
        .await?;

    for (name, stock, price_cents) in [("Matte Pomade", 12_i64, 1800_i64), ("Beard Oil", 8, 1500)]
    {
        sqlx::query(
            r#"INSERT INTO products (id, name, stock, price_cents, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(new_id())
        .bind(name)
        .bind(stock)
        .bind(price_cents)
        .bind(&now)
        .execute(pool)
        .await?;
    }

    Ok(())
}
