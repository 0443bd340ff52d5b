//! Component lookup and pricing.
//!
//! Resolves a (type, name) pair to its stored attribute record and prices
//! it with [`partprice_core::pricing`]. Used by both the `partprice price`
//! CLI command and the `POST /get-price` endpoint.

use anyhow::{Context, Result};
use partprice_core::pricing;
use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::db;
use crate::models::{ComponentRecord, PriceQuote};

const SELECT_COLUMNS: &str = "SELECT id, type, name, specs, source_path, created_at FROM components";

/// Load the component stored under exactly this type and name.
pub async fn find_component(
    pool: &SqlitePool,
    component_type: &str,
    name: &str,
) -> Result<Option<ComponentRecord>> {
    let row = sqlx::query(&format!("{} WHERE type = ? AND name = ?", SELECT_COLUMNS))
        .bind(component_type)
        .bind(name)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to look up {} '{}'", component_type, name))?;

    Ok(row.as_ref().map(row_to_record))
}

/// Price the component stored under (type, name), if there is one.
pub async fn quote(
    pool: &SqlitePool,
    currency: &str,
    component_type: &str,
    name: &str,
) -> Result<Option<PriceQuote>> {
    let record = find_component(pool, component_type, name).await?;
    Ok(record.map(|r| quote_record(&r, currency)))
}

pub fn quote_record(record: &ComponentRecord, currency: &str) -> PriceQuote {
    PriceQuote {
        component: record.name.clone(),
        component_type: record.component_type.clone(),
        price: pricing::price(&record.component_type, &record.specs),
        currency: currency.to_string(),
    }
}

/// Every stored component, ordered by type then name, optionally limited
/// to one type.
pub async fn list_components(
    pool: &SqlitePool,
    component_type: Option<&str>,
) -> Result<Vec<ComponentRecord>> {
    let rows = match component_type {
        Some(t) => {
            sqlx::query(&format!("{} WHERE type = ? ORDER BY name", SELECT_COLUMNS))
                .bind(t)
                .fetch_all(pool)
                .await?
        }
        None => {
            sqlx::query(&format!("{} ORDER BY type, name", SELECT_COLUMNS))
                .fetch_all(pool)
                .await?
        }
    };

    Ok(rows.iter().map(row_to_record).collect())
}

fn row_to_record(row: &SqliteRow) -> ComponentRecord {
    let specs_json: String = row.get("specs");
    // a corrupt specs column prices like an empty record
    let specs: Value = serde_json::from_str(&specs_json).unwrap_or(Value::Object(Default::default()));

    ComponentRecord {
        id: row.get("id"),
        component_type: row.get("type"),
        name: row.get("name"),
        specs,
        source_path: row.get("source_path"),
        created_at: row.get("created_at"),
    }
}

/// CLI entry point for `partprice price`.
pub async fn run_price(config: &Config, component_type: &str, name: &str) -> Result<()> {
    let pool = db::connect(config).await?;
    let record = find_component(&pool, component_type, name).await;
    pool.close().await;

    let record = match record? {
        Some(r) => r,
        None => {
            eprintln!("Error: component not found: {} '{}'", component_type, name);
            std::process::exit(1);
        }
    };

    let quote = quote_record(&record, &config.server.currency);

    println!("--- Component ---");
    println!("type:      {}", quote.component_type);
    println!("name:      {}", quote.component);
    if let Some(ref path) = record.source_path {
        println!("source:    {}", path);
    }
    println!("seeded_at: {}", format_ts_iso(record.created_at));
    println!("price:     {:.2} {}", quote.price, quote.currency);

    Ok(())
}

/// CLI entry point for `partprice list`.
pub async fn run_list(config: &Config, component_type: Option<&str>) -> Result<()> {
    let pool = db::connect(config).await?;
    let records = list_components(&pool, component_type).await;
    pool.close().await;
    let records = records?;

    if records.is_empty() {
        println!("No components found.");
        return Ok(());
    }

    println!("{:<12} {:<40} {:>10}", "TYPE", "NAME", "PRICE");
    for record in &records {
        let quote = quote_record(record, &config.server.currency);
        println!(
            "{:<12} {:<40} {:>10.2}",
            quote.component_type, quote.component, quote.price
        );
    }
    println!();
    println!("{} components ({})", records.len(), config.server.currency);

    Ok(())
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ts.to_string())
}
