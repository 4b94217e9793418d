//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs,
    init::InitArgs,
    item::ItemCommands,
    notify::NotifyCommands,
    pantry::PantryCommands,
    shop::ShopCommands,
    store::StoreCommands,
    tick::TickArgs,
};

#[derive(Parser)]
#[command(name = "larder")]
#[command(author, version, about = "Household pantry and shopping-list tracker")]
#[command(
    long_about = "Tracks pantry stock and shopping lists in a local SQLite store, with a daily expiration reminder and optional auto-replenishment of the shopping list."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Household root (default: auto-detect by finding .larder/)
    #[arg(long, global = true, env = "LARDER_HOME")]
    pub home: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new household
    Init(InitArgs),

    /// Item profile management
    #[command(subcommand)]
    Item(ItemCommands),

    /// Pantry stock management
    #[command(subcommand)]
    Pantry(PantryCommands),

    /// Shopping list management
    #[command(subcommand)]
    Shop(ShopCommands),

    /// Notification settings and fire time
    #[command(subcommand)]
    Notify(NotifyCommands),

    /// Run the daily tick (expiration reminder + auto-replenishment)
    Tick(TickArgs),

    /// Store maintenance and diagnostics
    #[command(subcommand)]
    Store(StoreCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (table for terminals)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just names, one per line
    Name,
}
