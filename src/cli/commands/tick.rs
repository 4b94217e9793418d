//! `larder tick` command - The daily trigger handler
//!
//! One tick runs the expiration evaluator and then the auto-replenishment
//! policy, sequentially. `--watch` keeps the process alive and fires at
//! the persisted time every 24 hours; each fire re-reads the preference
//! file, so time or lookback changes take effect without a restart. In
//! watch mode a failed tick is reported and the loop keeps going: the
//! schedule itself is the retry mechanism.

use chrono::{Local, NaiveDate};
use clap::Args;
use console::style;
use miette::Result;

use crate::cli::commands::utils::resolve_home;
use crate::cli::GlobalOpts;
use crate::core::dates::parse_date;
use crate::core::lookback::Lookback;
use crate::core::notifier::{self, Notifier};
use crate::core::replenish::replenish;
use crate::core::schedule::Prefs;
use crate::core::store::Store;
use crate::core::{evaluator, Config, Home};

#[derive(Args, Debug)]
pub struct TickArgs {
    /// Run as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Override the persisted lookback label for this run
    #[arg(long, value_enum)]
    pub lookback: Option<Lookback>,

    /// Keep running, firing at the persisted time every day
    #[arg(long, conflicts_with = "date")]
    pub watch: bool,
}

pub fn run(args: TickArgs, global: &GlobalOpts) -> Result<()> {
    let home = resolve_home(global)?;
    let config = Config::load(Some(&home));
    let mut notifier = notifier::from_config(&config);

    if args.watch {
        run_watch(&home, args.lookback, notifier.as_mut(), global)
    } else {
        let today = match &args.date {
            Some(date) => parse_date(date)
                .map_err(|_| miette::miette!("invalid date '{}', expected YYYY-MM-DD", date))?,
            None => Local::now().date_naive(),
        };
        let prefs = Prefs::load(&home);
        let lookback = args.lookback.unwrap_or(prefs.lookback);
        run_once(&home, today, lookback, notifier.as_mut(), global)
    }
}

/// Handle one fire of the daily trigger: evaluator, then policy.
fn run_once(
    home: &Home,
    today: NaiveDate,
    lookback: Lookback,
    notifier: &mut dyn Notifier,
    global: &GlobalOpts,
) -> Result<()> {
    let store = Store::open(home).map_err(|e| miette::miette!("{}", e))?;

    let payload = evaluator::evaluate(&store, today, lookback)
        .map_err(|e| miette::miette!("{}", e))?;
    match payload {
        Some(payload) => notifier.notify(&payload.title, &payload.body),
        None => {
            if !global.quiet {
                println!(
                    "Nothing expires in {} (on {}).",
                    lookback.phrase(),
                    lookback.target_date(today)
                );
            }
        }
    }

    let outcome = replenish(&store, today).map_err(|e| miette::miette!("{}", e))?;
    if outcome.enabled && !global.quiet {
        for name in &outcome.moved {
            println!(
                "{} {} expired today, moved to the shopping list",
                style("→").blue(),
                style(name).cyan()
            );
        }
    }
    for name in &outcome.duplicates {
        eprintln!(
            "{} {} was already on the shopping list; a duplicate entry now exists",
            style("!").yellow(),
            name
        );
    }
    for (name, error) in &outcome.failures {
        eprintln!(
            "{} could not replenish {}: {}",
            style("!").yellow(),
            name,
            error
        );
    }

    Ok(())
}

fn run_watch(
    home: &Home,
    lookback_override: Option<Lookback>,
    notifier: &mut dyn Notifier,
    global: &GlobalOpts,
) -> Result<()> {
    if !global.quiet {
        let prefs = Prefs::load(home);
        println!(
            "{} Watching; next fire at {}",
            style("✓").green(),
            style(prefs.next_fire(Local::now().naive_local()).format("%Y-%m-%d %H:%M")).cyan()
        );
    }

    loop {
        // Re-read preferences each cycle so settings changes apply at the
        // next fire, and so a restarted watcher resumes the schedule.
        let prefs = Prefs::load(home);
        let now = Local::now().naive_local();
        let next = prefs.next_fire(now);

        let wait = (next - now)
            .to_std()
            .unwrap_or(std::time::Duration::from_secs(0));
        std::thread::sleep(wait);

        let today = Local::now().date_naive();
        let lookback = lookback_override.unwrap_or(prefs.lookback);
        if let Err(e) = run_once(home, today, lookback, notifier, global) {
            // Abandon this tick; the next scheduled fire retries.
            eprintln!("{} tick failed: {}", style("!").yellow(), e);
        }
    }
}
