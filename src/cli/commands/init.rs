//! `larder init` command - Initialize a new household

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::home::{Home, HomeError};
use crate::core::schedule::Prefs;
use crate::core::store::Store;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    // Create directory if it doesn't exist
    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    match Home::init(&path) {
        Ok(home) => {
            // Create the store with its schema and default settings row,
            // and the default trigger preferences (12:00, one day notice).
            Store::open(&home).map_err(|e| miette::miette!("{}", e))?;
            Prefs::default()
                .save(&home)
                .map_err(|e| miette::miette!("{}", e))?;

            println!(
                "{} Initialized household at {}",
                style("✓").green(),
                style(home.root().display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!(
                "  {} Stock your first item",
                style("larder pantry add --name milk --qty 1 --category Dairy --shelf-life 10")
                    .yellow()
            );
            println!("  {} See what's stocked", style("larder pantry list").yellow());
            println!(
                "  {} Schedule the daily reminder via cron or `larder tick --watch`",
                style("larder notify show").yellow()
            );
            Ok(())
        }
        Err(HomeError::AlreadyExists(path)) => {
            println!(
                "{} Household already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
