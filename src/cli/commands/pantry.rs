//! `larder pantry` command - Pantry stock management
//!
//! Stocking an item creates its profile on the fly when needed and derives
//! a concrete expiration date from the shelf life, unless the user supplies
//! one. Moving an item to the shopping list carries its quantity along.

use chrono::Local;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::open_store;
use crate::cli::helpers::canonical_name;
use crate::cli::table::{render, TableConfig};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dates::{expiration_from_shelf_life, parse_date, FALLBACK_EXPIRATION};
use crate::core::lookback::Lookback;
use crate::core::store::{PantryItemInfo, Store};

#[derive(Subcommand, Debug)]
pub enum PantryCommands {
    /// List pantry stock with filtering
    List(ListArgs),

    /// Stock an item (creates the item profile if needed)
    Add(AddArgs),

    /// Increase an item's quantity by one
    Inc(NameArg),

    /// Decrease an item's quantity by one (floor at zero)
    Dec(NameArg),

    /// Set an item's quantity
    SetQty(SetQtyArgs),

    /// Set an item's expiration date
    SetDate(SetDateArgs),

    /// Move an item to the shopping list, keeping its quantity
    Use(NameArg),

    /// Remove an item from the pantry
    Rm(NameArg),

    /// Show items expiring on a date or within a notice period
    Expiring(ExpiringArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by category (exact match)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Filter by name substring (case-insensitive)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Print only the number of matches
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Item name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Quantity to stock
    #[arg(long, default_value = "1")]
    pub qty: i64,

    /// Category (required when the item has no profile yet)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Shelf life in days (required when the item has no profile yet)
    #[arg(long, short = 'l')]
    pub shelf_life: Option<i64>,

    /// Explicit expiration date (YYYY-MM-DD) instead of one derived from
    /// the shelf life
    #[arg(long, short = 'e')]
    pub expires: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct NameArg {
    /// Item name
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct SetQtyArgs {
    /// Item name
    pub name: String,

    /// New quantity
    pub qty: i64,
}

#[derive(clap::Args, Debug)]
pub struct SetDateArgs {
    /// Item name
    pub name: String,

    /// New expiration date (YYYY-MM-DD)
    pub date: String,
}

#[derive(clap::Args, Debug)]
pub struct ExpiringArgs {
    /// Exact date to check (YYYY-MM-DD)
    #[arg(long, conflicts_with = "within")]
    pub on: Option<String>,

    /// Notice period to check (e.g. one-week)
    #[arg(long, value_enum)]
    pub within: Option<Lookback>,
}

pub fn run(cmd: PantryCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        PantryCommands::List(args) => run_list(args, global),
        PantryCommands::Add(args) => run_add(args, global),
        PantryCommands::Inc(args) => run_adjust(&args.name, 1, global),
        PantryCommands::Dec(args) => run_adjust(&args.name, -1, global),
        PantryCommands::SetQty(args) => run_set_qty(args, global),
        PantryCommands::SetDate(args) => run_set_date(args, global),
        PantryCommands::Use(args) => run_use(args, global),
        PantryCommands::Rm(args) => run_rm(args, global),
        PantryCommands::Expiring(args) => run_expiring(args, global),
    }
}

fn print_pantry_rows(rows: &[PantryItemInfo], global: &GlobalOpts) -> Result<()> {
    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&rows).into_diagnostic()?);
        }
        format => {
            let table_rows: Vec<Vec<String>> = rows
                .iter()
                .map(|info| {
                    vec![
                        info.name.clone(),
                        info.category.clone(),
                        info.quantity.to_string(),
                        info.user_expiration
                            .clone()
                            .unwrap_or_else(|| info.fallback_expiration.clone()),
                    ]
                })
                .collect();
            render(
                &["Name", "Category", "Qty", "Expires"],
                &table_rows,
                format,
                &TableConfig::new("pantry item"),
            );
        }
    }
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;

    let rows = store
        .pantry_overview()
        .map_err(|e| miette::miette!("{}", e))?;
    let rows: Vec<_> = rows
        .into_iter()
        .filter(|info| {
            args.category
                .as_ref()
                .map_or(true, |c| info.category.eq_ignore_ascii_case(c))
        })
        .filter(|info| {
            args.search.as_ref().map_or(true, |s| {
                info.name.to_lowercase().contains(&s.to_lowercase())
            })
        })
        .collect();

    if args.count {
        println!("{}", rows.len());
        return Ok(());
    }
    if rows.is_empty() {
        println!("Pantry is empty.");
        return Ok(());
    }

    print_pantry_rows(&rows, global)
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(&args.name);

    if name.is_empty() {
        return Err(miette::miette!("item name must not be empty"));
    }
    if args.qty < 0 {
        return Err(miette::miette!("quantity must be non-negative"));
    }

    let item = ensure_item_profile(&store, &name, &args)?;

    if store
        .pantry_exists(&name)
        .map_err(|e| miette::miette!("{}", e))?
    {
        println!(
            "{} {} is already stocked; use {} or {}",
            style("!").yellow(),
            style(&name).cyan(),
            style("larder pantry inc").yellow(),
            style("larder pantry set-qty").yellow()
        );
        return Ok(());
    }

    let expiration = match &args.expires {
        Some(date) => {
            parse_date(date)
                .map_err(|_| miette::miette!("invalid date '{}', expected YYYY-MM-DD", date))?;
            date.clone()
        }
        None => {
            let shelf_life = args.shelf_life.unwrap_or(item.shelf_life_days);
            expiration_from_shelf_life(Local::now().date_naive(), shelf_life)
        }
    };

    store
        .insert_pantry(item.item_id, args.qty, Some(expiration.as_str()), FALLBACK_EXPIRATION)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Stocked {} x{}, expires {}",
            style("✓").green(),
            style(&name).cyan(),
            args.qty,
            expiration
        );
    }
    Ok(())
}

/// Fetch the item profile, creating it when category and shelf life were
/// supplied for a first-time item.
fn ensure_item_profile(
    store: &Store,
    name: &str,
    args: &AddArgs,
) -> Result<crate::core::store::Item> {
    if let Some(item) = store.get_item(name).map_err(|e| miette::miette!("{}", e))? {
        return Ok(item);
    }

    let (Some(category), Some(shelf_life)) = (&args.category, args.shelf_life) else {
        return Err(miette::miette!(
            "'{}' has no item profile yet; pass --category and --shelf-life to create one",
            name
        ));
    };

    store
        .insert_item(category, name, shelf_life)
        .map_err(|e| miette::miette!("{}", e))?;
    store
        .get_item(name)
        .map_err(|e| miette::miette!("{}", e))?
        .ok_or_else(|| miette::miette!("item profile '{}' vanished after insert", name))
}

fn run_adjust(raw_name: &str, delta: i64, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(raw_name);

    let current = store
        .pantry_quantity(&name)
        .map_err(|e| miette::miette!("{}", e))?
        .ok_or_else(|| miette::miette!("'{}' is not in the pantry", name))?;

    let next = (current + delta).max(0);
    store
        .set_pantry_quantity(&name, next)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!("{} {} x{}", style("✓").green(), style(&name).cyan(), next);
    }
    Ok(())
}

fn run_set_qty(args: SetQtyArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(&args.name);

    if args.qty < 0 {
        return Err(miette::miette!("quantity must be non-negative"));
    }
    store
        .set_pantry_quantity(&name, args.qty)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!("{} {} x{}", style("✓").green(), style(&name).cyan(), args.qty);
    }
    Ok(())
}

fn run_set_date(args: SetDateArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(&args.name);

    parse_date(&args.date)
        .map_err(|_| miette::miette!("invalid date '{}', expected YYYY-MM-DD", args.date))?;
    store
        .set_pantry_expiration(&name, &args.date)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} {} now expires {}",
            style("✓").green(),
            style(&name).cyan(),
            args.date
        );
    }
    Ok(())
}

fn run_use(args: NameArg, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(&args.name);

    let quantity = store
        .pantry_quantity(&name)
        .map_err(|e| miette::miette!("{}", e))?
        .ok_or_else(|| miette::miette!("'{}' is not in the pantry", name))?;
    let item_id = store
        .item_id(&name)
        .map_err(|e| miette::miette!("{}", e))?
        .ok_or_else(|| miette::miette!("no item profile named '{}'", name))?;

    store
        .insert_shopping(item_id, quantity)
        .map_err(|e| miette::miette!("{}", e))?;
    store
        .delete_pantry(&name)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Moved {} x{} to the shopping list",
            style("✓").green(),
            style(&name).cyan(),
            quantity
        );
    }
    Ok(())
}

fn run_rm(args: NameArg, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(&args.name);

    store
        .delete_pantry(&name)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Removed {} from the pantry",
            style("✓").green(),
            style(&name).cyan()
        );
    }
    Ok(())
}

fn run_expiring(args: ExpiringArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;

    let date = match (&args.on, args.within) {
        (Some(date), _) => {
            parse_date(date)
                .map_err(|_| miette::miette!("invalid date '{}', expected YYYY-MM-DD", date))?;
            date.clone()
        }
        (None, within) => {
            let lookback = within.unwrap_or_default();
            lookback.target_date(Local::now().date_naive())
        }
    };

    let rows = store
        .pantry_by_date(&date)
        .map_err(|e| miette::miette!("{}", e))?;

    if rows.is_empty() {
        println!("Nothing expires on {}.", date);
        return Ok(());
    }
    print_pantry_rows(&rows, global)
}
