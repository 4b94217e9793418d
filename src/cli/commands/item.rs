//! `larder item` command - Item profile management
//!
//! Item profiles record what a product is (category) and how long it keeps
//! by default (shelf life). Pantry and shopping rows reference profiles by
//! name, so a profile outlives any individual stocking of it.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::open_store;
use crate::cli::helpers::canonical_name;
use crate::cli::table::{render, TableConfig};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// List item profiles with filtering
    List(ListArgs),

    /// Create a new item profile
    New(NewArgs),

    /// Change an item's default shelf life
    SetShelfLife(SetShelfLifeArgs),

    /// Remove an item profile
    Rm(RmArgs),

    /// List distinct categories in use
    Categories,
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
pub struct NewArgs {
    /// Item name (canonicalized to capitalized-first-letter form)
    #[arg(long, short = 'n')]
    pub name: String,

    /// Category, e.g. "Vegetable"
    #[arg(long, short = 'c')]
    pub category: String,

    /// Default days from acquisition to expiry
    #[arg(long, short = 'l')]
    pub shelf_life: i64,
}

#[derive(clap::Args, Debug)]
pub struct SetShelfLifeArgs {
    /// Item name
    pub name: String,

    /// New default shelf life in days
    pub days: i64,
}

#[derive(clap::Args, Debug)]
pub struct RmArgs {
    /// Item name
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: ItemCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ItemCommands::List(args) => run_list(args, global),
        ItemCommands::New(args) => run_new(args, global),
        ItemCommands::SetShelfLife(args) => run_set_shelf_life(args, global),
        ItemCommands::Rm(args) => run_rm(args, global),
        ItemCommands::Categories => run_categories(global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;

    let items = store.list_items().map_err(|e| miette::miette!("{}", e))?;
    let items: Vec<_> = items
        .into_iter()
        .filter(|i| {
            args.category
                .as_ref()
                .map_or(true, |c| i.category.eq_ignore_ascii_case(c))
        })
        .filter(|i| {
            args.search
                .as_ref()
                .map_or(true, |s| i.name.to_lowercase().contains(&s.to_lowercase()))
        })
        .collect();

    if args.count {
        println!("{}", items.len());
        return Ok(());
    }
    if items.is_empty() {
        println!("No items found.");
        return Ok(());
    }

    match global.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&items).into_diagnostic()?
            );
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&items).into_diagnostic()?);
        }
        format => {
            let rows: Vec<Vec<String>> = items
                .iter()
                .map(|i| {
                    vec![
                        i.name.clone(),
                        i.category.clone(),
                        i.shelf_life_days.to_string(),
                    ]
                })
                .collect();
            render(
                &["Name", "Category", "Shelf life (days)"],
                &rows,
                format,
                &TableConfig::new("item"),
            );
        }
    }

    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(&args.name);

    if name.is_empty() {
        return Err(miette::miette!("item name must not be empty"));
    }
    if store
        .item_exists(&name)
        .map_err(|e| miette::miette!("{}", e))?
    {
        return Err(miette::miette!(
            "item profile '{}' already exists; use `larder item set-shelf-life` to change it",
            name
        ));
    }

    store
        .insert_item(&args.category, &name, args.shelf_life)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Created item profile {} ({}, keeps {} days)",
            style("✓").green(),
            style(&name).cyan(),
            args.category,
            args.shelf_life
        );
    }
    Ok(())
}

fn run_set_shelf_life(args: SetShelfLifeArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(&args.name);

    store
        .set_shelf_life(&name, args.days)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} {} now keeps {} days by default",
            style("✓").green(),
            style(&name).cyan(),
            args.days
        );
    }
    Ok(())
}

fn run_rm(args: RmArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    let name = canonical_name(&args.name);

    // Pantry and shopping rows reference the profile; removing it under
    // them would orphan name-keyed lookups.
    let in_pantry = store
        .pantry_exists(&name)
        .map_err(|e| miette::miette!("{}", e))?;
    let on_list = store
        .shopping_exists(&name)
        .map_err(|e| miette::miette!("{}", e))?;
    if in_pantry || on_list {
        return Err(miette::miette!(
            "'{}' is still referenced by the pantry or shopping list; remove those entries first",
            name
        ));
    }

    if !args.yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Remove item profile '{}'?", name))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    store
        .remove_item(&name)
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!("{} Removed item profile {}", style("✓").green(), style(&name).cyan());
    }
    Ok(())
}

fn run_categories(global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    for category in store.categories().map_err(|e| miette::miette!("{}", e))? {
        println!("{}", category);
    }
    Ok(())
}
