//! `larder shop` command - Shopping list management
//!
//! A shopping entry references an item profile; adding a name that has no
//! profile yet requires enough flags to create one first. Buying an item
//! moves it back into the pantry: quantities merge into an existing pantry
//! row, or a fresh row is created with a shelf-life-derived expiration.

use chrono::Local;
use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::open_store;
use crate::cli::helpers::canonical_name;
use crate::cli::table::{render, TableConfig};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::dates::{expiration_from_shelf_life, FALLBACK_EXPIRATION};

#[derive(Subcommand, Debug)]
pub enum ShopCommands {
    /// List shopping entries
    List(ListArgs),

    /// Add an item to the shopping list
    Add(AddArgs),

    /// Increase an entry's quantity by one
    Inc(NameArg),

    /// Decrease an entry's quantity by one (floor at zero)
    Dec(NameArg),

    /// Mark an entry purchased: move it into the pantry
    Buy(NameArg),

    /// Remove an entry from the shopping list
    Rm(NameArg),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
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

    /// Quantity to request
    #[arg(long, default_value = "1")]
    pub qty: i64,

    /// Category (required when the item has no profile yet)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Shelf life in days (required when the item has no profile yet)
    #[arg(long, short = 'l')]
    pub shelf_life: Option<i64>,
}

#[derive(clap::Args, Debug)]
pub struct NameArg {
    /// Item name
    pub name: String,
}

pub fn run(cmd: ShopCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ShopCommands::List(args) => run_list(args, global),
        ShopCommands::Add(args) => run_add(args, global),
        ShopCommands::Inc(args) => run_adjust(&args.name, 1, global),
        ShopCommands::Dec(args) => run_adjust(&args.name, -1, global),
        ShopCommands::Buy(args) => run_buy(args, global),
        ShopCommands::Rm(args) => run_rm(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;

    let rows = store
        .shopping_overview()
        .map_err(|e| miette::miette!("{}", e))?;
    let rows: Vec<_> = rows
        .into_iter()
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
        println!("Shopping list is empty.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows).into_diagnostic()?);
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
                    ]
                })
                .collect();
            render(
                &["Name", "Category", "Qty"],
                &table_rows,
                format,
                &TableConfig::new("shopping entry"),
            );
        }
    }
    Ok(())
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

    if store
        .shopping_exists(&name)
        .map_err(|e| miette::miette!("{}", e))?
    {
        println!(
            "{} {} is already on the shopping list; use {}",
            style("!").yellow(),
            style(&name).cyan(),
            style("larder shop inc").yellow()
        );
        return Ok(());
    }

    let item_id = match store.item_id(&name).map_err(|e| miette::miette!("{}", e))? {
        Some(id) => id,
        None => {
            let (Some(category), Some(shelf_life)) = (&args.category, args.shelf_life) else {
                return Err(miette::miette!(
                    "'{}' has no item profile yet; pass --category and --shelf-life to create one",
                    name
                ));
            };
            store
                .insert_item(category, &name, shelf_life)
                .map_err(|e| miette::miette!("{}", e))?
        }
    };

    store
        .insert_shopping(item_id, args.qty)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Added {} x{} to the shopping list",
            style("✓").green(),
            style(&name).cyan(),
            args.qty
        );
    }
    Ok(())
}

fn run_adjust(raw_name: &str, delta: i64, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(raw_name);

    let current = store
        .shopping_quantity(&name)
        .map_err(|e| miette::miette!("{}", e))?
        .ok_or_else(|| miette::miette!("'{}' is not on the shopping list", name))?;

    let next = (current + delta).max(0);
    store
        .set_shopping_quantity(&name, next)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!("{} {} x{}", style("✓").green(), style(&name).cyan(), next);
    }
    Ok(())
}

fn run_buy(args: NameArg, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(&args.name);

    let bought = store
        .shopping_quantity(&name)
        .map_err(|e| miette::miette!("{}", e))?
        .ok_or_else(|| miette::miette!("'{}' is not on the shopping list", name))?;

    match store
        .pantry_quantity(&name)
        .map_err(|e| miette::miette!("{}", e))?
    {
        Some(current) => {
            // Already stocked: merge the purchased quantity in.
            store
                .set_pantry_quantity(&name, current + bought)
                .map_err(|e| miette::miette!("{}", e))?;
        }
        None => {
            let item = store
                .get_item(&name)
                .map_err(|e| miette::miette!("{}", e))?
                .ok_or_else(|| miette::miette!("no item profile named '{}'", name))?;
            let expiration =
                expiration_from_shelf_life(Local::now().date_naive(), item.shelf_life_days);
            store
                .insert_pantry(item.item_id, bought, Some(expiration.as_str()), FALLBACK_EXPIRATION)
                .map_err(|e| miette::miette!("{}", e))?;
        }
    }

    store
        .remove_shopping(&name)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Bought {} x{}, moved to the pantry",
            style("✓").green(),
            style(&name).cyan(),
            bought
        );
    }
    Ok(())
}

fn run_rm(args: NameArg, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(&args.name);

    store
        .remove_shopping(&name)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Removed {} from the shopping list",
            style("✓").green(),
            style(&name).cyan()
        );
    }
    Ok(())
}
