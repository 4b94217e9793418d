//! `larder notify` command - Notification settings and fire time
//!
//! The fire time and the lookback label live in the preference file the
//! trigger reads on every fire; the settings row in the store carries the
//! toggles and a numeric copy of the lookback offset. Both are written
//! through the same `Lookback` mapping, so they cannot drift apart.

use chrono::Local;
use clap::{Subcommand, ValueEnum};
use console::style;
use miette::Result;

use crate::cli::commands::utils::{open_store, resolve_home};
use crate::cli::GlobalOpts;
use crate::core::lookback::Lookback;
use crate::core::schedule::Prefs;

#[derive(Subcommand, Debug)]
pub enum NotifyCommands {
    /// Show current notification settings and the next fire time
    Show,

    /// Set the daily fire time (HH:MM, 24-hour)
    Time(TimeArgs),

    /// Set how far ahead of expiration the reminder fires
    Lookback(LookbackArgs),

    /// Enable or disable auto-replenishment of the shopping list
    Auto(ToggleArgs),

    /// Enable or disable user-entered expiration dates
    UserDates(ToggleArgs),
}

#[derive(clap::Args, Debug)]
pub struct TimeArgs {
    /// Fire time, e.g. 07:30
    pub time: String,
}

#[derive(clap::Args, Debug)]
pub struct LookbackArgs {
    /// Notice period
    #[arg(value_enum)]
    pub label: Lookback,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    fn enabled(self) -> bool {
        matches!(self, Toggle::On)
    }
}

#[derive(clap::Args, Debug)]
pub struct ToggleArgs {
    /// New state
    #[arg(value_enum)]
    pub state: Toggle,
}

pub fn run(cmd: NotifyCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        NotifyCommands::Show => run_show(global),
        NotifyCommands::Time(args) => run_time(args, global),
        NotifyCommands::Lookback(args) => run_lookback(args, global),
        NotifyCommands::Auto(args) => run_auto(args, global),
        NotifyCommands::UserDates(args) => run_user_dates(args, global),
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let (home, store) = open_store(global)?;
    let settings = store.settings().map_err(|e| miette::miette!("{}", e))?;
    let prefs = Prefs::load(&home);

    println!("{}", style("Notification Settings").bold());
    println!("{}", style("─".repeat(40)).dim());
    println!("  Fire time:         {}", style(prefs.fire_time_label()).cyan());
    println!(
        "  Lookback:          {} ({} day(s) ahead)",
        style(prefs.lookback.label()).cyan(),
        prefs.lookback.offset_days()
    );
    println!(
        "  Auto-replenish:    {}",
        style(on_off(settings.auto_populate)).cyan()
    );
    println!(
        "  User dates:        {}",
        style(on_off(settings.use_user_expiration)).cyan()
    );
    println!();
    println!(
        "  Next fire:         {}",
        style(prefs.next_fire(Local::now().naive_local()).format("%Y-%m-%d %H:%M")).cyan()
    );
    println!(
        "  Run {} daily at that time, or keep {} running",
        style("larder tick").yellow(),
        style("larder tick --watch").yellow()
    );
    Ok(())
}

fn run_time(args: TimeArgs, global: &GlobalOpts) -> Result<()> {
    let home = resolve_home(global)?;
    let (hour, minute) =
        Prefs::parse_fire_time(&args.time).map_err(|e| miette::miette!("{}", e))?;

    let mut prefs = Prefs::load(&home);
    prefs.hour = hour;
    prefs.minute = minute;
    prefs.save(&home).map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Daily reminder fires at {}",
            style("✓").green(),
            style(prefs.fire_time_label()).cyan()
        );
    }
    Ok(())
}

fn run_lookback(args: LookbackArgs, global: &GlobalOpts) -> Result<()> {
    let (home, store) = open_store(global)?;

    let mut prefs = Prefs::load(&home);
    prefs.lookback = args.label;
    prefs.save(&home).map_err(|e| miette::miette!("{}", e))?;
    // Keep the numeric copy in the settings row in step, through the same
    // mapping the evaluator uses.
    store
        .set_lookback_days(args.label.offset_days())
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Reminders now fire {} ahead of expiration",
            style("✓").green(),
            style(args.label.phrase()).cyan()
        );
    }
    Ok(())
}

fn run_auto(args: ToggleArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    store
        .set_auto_populate(args.state.enabled())
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} Auto-replenishment {}",
            style("✓").green(),
            style(on_off(args.state.enabled())).cyan()
        );
    }
    Ok(())
}

fn run_user_dates(args: ToggleArgs, global: &GlobalOpts) -> Result<()> {
    let (_home, store) = open_store(global)?;
    store
        .set_use_user_expiration(args.state.enabled())
        .map_err(|e| miette::miette!("{}", e))?;

    if !global.quiet {
        println!(
            "{} User expiration dates {}",
            style("✓").green(),
            style(on_off(args.state.enabled())).cyan()
        );
    }
    Ok(())
}
