//! First-run seeding from a directory of JSON spec files.
//!
//! The seeder walks `[seed].specs_dir`, parses every file matching the
//! include globs as one component's attribute record, and bulk-inserts the
//! records into the `components` table. It only runs against an empty
//! table unless forced; it is a one-time load, not a sync.
//!
//! # Layout
//!
//! ```text
//! specs/
//! ├── CPU/
//! │   ├── ryzen-7-5800x.json
//! │   └── core-i9-13900k.json
//! └── GPU/
//!     └── rtx-4090.json
//! ```
//!
//! The component type is the first directory below `specs_dir`. Files at
//! the top level take it from the record's string `component_type` field
//! instead. A record's own `type` field is an ordinary attribute (Storage
//! uses it for the medium) and never selects the component type. The
//! component name is the record's string `name` field, otherwise the file
//! stem. Files that are unreadable, not JSON objects, or have no derivable
//! type are skipped with a warning.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde_json::Value;
use sqlx::SqlitePool;
use std::path::{Component, Path};
use walkdir::WalkDir;

use crate::config::Config;
use crate::db;
use crate::migrate;
use crate::models::SpecItem;

/// Record field naming the type of a spec file that sits directly in
/// `specs_dir`.
const COMPONENT_TYPE_FIELD: &str = "component_type";

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    /// Whether the table was (re)loaded in this run.
    pub seeded: bool,
    /// Spec files that parsed into components.
    pub found: usize,
    pub inserted: u64,
    /// Later files repeating an already-inserted (type, name) pair.
    pub duplicates: u64,
    /// Rows present before the run.
    pub existing: i64,
}

/// Walk the specs directory and parse every matching file.
pub fn scan_specs(config: &Config) -> Result<Vec<SpecItem>> {
    let seed_config = &config.seed;
    let root = &seed_config.specs_dir;
    if !root.is_dir() {
        bail!("Specs directory does not exist: {}", root.display());
    }

    let include_set = build_globset(&seed_config.include_globs)?;

    let mut default_excludes = vec!["**/.git/**".to_string()];
    default_excludes.extend(seed_config.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut items = Vec::new();

    let walker = WalkDir::new(root).follow_links(seed_config.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().replace('\\', "/");

        if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
            continue;
        }

        if let Some(item) = file_to_spec_item(path, relative, &rel_str) {
            items.push(item);
        }
    }

    items.sort_by(|a, b| a.source_path.cmp(&b.source_path));

    Ok(items)
}

fn file_to_spec_item(path: &Path, relative: &Path, rel_str: &str) -> Option<SpecItem> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(file = rel_str, error = %e, "skipping unreadable spec file");
            return None;
        }
    };

    let specs: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(file = rel_str, error = %e, "skipping invalid JSON spec file");
            return None;
        }
    };

    if !specs.is_object() {
        tracing::warn!(file = rel_str, "skipping spec file: top level is not an object");
        return None;
    }

    let component_type =
        match type_dir(relative).or_else(|| string_field(&specs, COMPONENT_TYPE_FIELD)) {
            Some(t) => t,
            None => {
                tracing::warn!(
                    file = rel_str,
                    "skipping spec file: not inside a type directory and no 'component_type' field"
                );
                return None;
            }
        };

    let name = match string_field(&specs, "name").or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
    }) {
        Some(n) => n,
        None => {
            tracing::warn!(file = rel_str, "skipping spec file: cannot derive a name");
            return None;
        }
    };

    Some(SpecItem {
        component_type,
        name,
        specs,
        source_path: rel_str.to_string(),
    })
}

/// Non-empty string stored directly under `key`.
fn string_field(specs: &Value, key: &str) -> Option<String> {
    specs
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// First directory of a relative path, if the file is nested at all.
fn type_dir(relative: &Path) -> Option<String> {
    let mut components = relative.components();
    let first = components.next()?;
    // a bare file name has no type directory
    components.next()?;
    match first {
        Component::Normal(dir) => Some(dir.to_string_lossy().to_string()),
        _ => None,
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("Invalid glob: {}", pattern))?);
    }
    Ok(builder.build()?)
}

pub async fn count_components(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM components")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Load spec files into the table, but only when it is empty, or always
/// (after clearing it) when `force` is set.
pub async fn seed(pool: &SqlitePool, config: &Config, force: bool) -> Result<SeedReport> {
    let existing = count_components(pool).await?;
    if existing > 0 && !force {
        return Ok(SeedReport {
            existing,
            ..SeedReport::default()
        });
    }

    let items = scan_specs(config)?;
    tracing::info!(
        specs_dir = %config.seed.specs_dir.display(),
        files = items.len(),
        "seeding component database"
    );

    let mut tx = pool.begin().await?;
    if force {
        sqlx::query("DELETE FROM components")
            .execute(&mut *tx)
            .await?;
    }

    let now = chrono::Utc::now().timestamp();
    let mut inserted = 0u64;
    let mut duplicates = 0u64;
    for item in &items {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO components (type, name, specs, source_path, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&item.component_type)
        .bind(&item.name)
        .bind(item.specs.to_string())
        .bind(&item.source_path)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(
                file = %item.source_path,
                component_type = %item.component_type,
                name = %item.name,
                "duplicate component ignored"
            );
            duplicates += 1;
        } else {
            inserted += 1;
        }
    }
    tx.commit().await?;

    tracing::info!(inserted, duplicates, "seeding complete");

    Ok(SeedReport {
        seeded: true,
        found: items.len(),
        inserted,
        duplicates,
        existing,
    })
}

/// Server startup hook: seed on first run, tolerate a missing specs
/// directory.
pub async fn seed_if_empty(pool: &SqlitePool, config: &Config) -> Result<SeedReport> {
    let existing = count_components(pool).await?;
    if existing > 0 {
        tracing::info!(components = existing, "database already seeded");
        return Ok(SeedReport {
            existing,
            ..SeedReport::default()
        });
    }
    if !config.seed.specs_dir.is_dir() {
        tracing::warn!(
            specs_dir = %config.seed.specs_dir.display(),
            "specs directory not found, starting with an empty database"
        );
        return Ok(SeedReport::default());
    }
    seed(pool, config, false).await
}

/// CLI entry point for `partprice seed`.
pub async fn run_seed(config: &Config, force: bool) -> Result<()> {
    let pool = db::connect(config).await?;
    migrate::run_migrations(&pool).await?;

    let report = seed(&pool, config, force).await;
    pool.close().await;
    let report = report?;

    if !report.seeded {
        println!(
            "database already seeded ({} components); use --force to reseed",
            report.existing
        );
        return Ok(());
    }

    println!("seed {}", config.seed.specs_dir.display());
    println!("  spec files parsed:   {}", report.found);
    println!("  components inserted: {}", report.inserted);
    println!("  duplicates ignored:  {}", report.duplicates);
    println!("ok");

    Ok(())
}
