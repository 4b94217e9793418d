//! `larder store` command - Store maintenance and diagnostics
//!
//! The store is the system of record, so the destructive operations here
//! confirm before acting. `query` exposes read-only SQL for power users;
//! `seed` loads a small demo dataset for trying the tool out.

use chrono::Local;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::open_store;
use crate::cli::table::{render, TableConfig};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dates::{expiration_from_shelf_life, FALLBACK_EXPIRATION};
use crate::core::store::Store;

#[derive(Subcommand, Debug)]
pub enum StoreCommands {
    /// Show store statistics
    Status,

    /// Execute SQL query against the store (read-only)
    Query {
        /// SQL query to execute
        sql: String,
    },

    /// Delete all items, pantry stock, and shopping entries
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Load a demo dataset of common grocery items
    Seed,
}

pub fn run(cmd: StoreCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        StoreCommands::Status => run_status(global),
        StoreCommands::Query { sql } => run_query(&sql, global),
        StoreCommands::Reset { yes } => run_reset(yes, global),
        StoreCommands::Seed => run_seed(global),
    }
}

fn run_status(global: &GlobalOpts) -> Result<()> {
    let (home, store) = open_store(global)?;
    let stats = store
        .statistics(&home.store_path())
        .map_err(|e| miette::miette!("{}", e))?;

    println!("{}", style("Store Status").bold());
    println!("{}", style("─".repeat(40)).dim());
    println!("  Location:         {}", home.store_path().display());
    println!("  Item profiles:    {}", style(stats.items).cyan());
    println!("  Pantry entries:   {}", style(stats.pantry_entries).cyan());
    println!("  Shopping entries: {}", style(stats.shopping_entries).cyan());
    println!(
        "  Database size:    {} KB",
        style(stats.db_size_bytes / 1024).cyan()
    );
    Ok(())
}

fn run_query(sql: &str, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;

    let columns = store
        .query_columns(sql)
        .map_err(|e| miette::miette!("{}", e))?;
    let rows = store.query_raw(sql).map_err(|e| miette::miette!("{}", e))?;

    // SQL output is meant for piping; Auto lands on TSV here.
    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    };

    match format {
        OutputFormat::Json => {
            let json_rows: Vec<serde_json::Value> = rows
                .iter()
                .map(|row| {
                    let mut obj = serde_json::Map::new();
                    for (i, col) in columns.iter().enumerate() {
                        if let Some(val) = row.get(i) {
                            obj.insert(col.clone(), serde_json::Value::String(val.clone()));
                        }
                    }
                    serde_json::Value::Object(obj)
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json_rows).into_diagnostic()?
            );
        }
        format => {
            let headers: Vec<&str> = columns.iter().map(String::as_str).collect();
            render(&headers, &rows, format, &TableConfig::for_pipe("row"));
        }
    }
    Ok(())
}

fn run_reset(yes: bool, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;

    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt("Delete ALL items, pantry stock, and shopping entries?")
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.reset().map_err(|e| miette::miette!("{}", e))?;
    println!("{} Store cleared (settings retained)", style("✓").green());
    Ok(())
}

/// Demo items: (category, name, shelf life days, pantry quantity).
/// A zero quantity means the item gets a profile but no pantry row.
const SEED_ITEMS: &[(&str, &str, i64, i64)] = &[
    ("Vegetable", "Onion", 14, 10),
    ("Meat", "Chicken breast", 5, 6),
    ("Meat", "Ground beef", 5, 10),
    ("Vegetable", "Lettuce", 7, 4),
    ("Fruit", "Strawberries", 7, 20),
    ("Fruit", "Mango", 7, 6),
    ("Grain", "Rice", 90, 6),
    ("Dairy", "Milk", 10, 1),
    ("Fruit", "Apple", 7, 0),
    ("Misc", "Bread", 15, 0),
];

/// Demo shopping entries: (name, quantity). Names must appear above.
const SEED_SHOPPING: &[(&str, i64)] = &[("Apple", 6), ("Bread", 2)];

fn run_seed(global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let today = Local::now().date_naive();

    seed_store(&store, today).map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Seeded {} item profiles, {} pantry entries, {} shopping entries",
            style("✓").green(),
            SEED_ITEMS.len(),
            SEED_ITEMS.iter().filter(|(_, _, _, qty)| *qty > 0).count(),
            SEED_SHOPPING.len()
        );
    }
    Ok(())
}

fn seed_store(store: &Store, today: chrono::NaiveDate) -> Result<(), crate::core::store::StoreError> {
    for (category, name, shelf_life, quantity) in SEED_ITEMS {
        if store.item_exists(name)? {
            continue;
        }
        let item_id = store.insert_item(category, name, *shelf_life)?;
        if *quantity > 0 && !store.pantry_exists(name)? {
            let expiration = expiration_from_shelf_life(today, *shelf_life);
            store.insert_pantry(item_id, *quantity, Some(expiration.as_str()), FALLBACK_EXPIRATION)?;
        }
    }

    for (name, quantity) in SEED_SHOPPING {
        if store.shopping_exists(name)? {
            continue;
        }
        if let Some(item_id) = store.item_id(name)? {
            store.insert_shopping(item_id, *quantity)?;
        }
    }

    Ok(())
}
