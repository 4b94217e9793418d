use clap::Parser;
use miette::Result;

use larder::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => larder::cli::commands::init::run(args),
        Commands::Item(cmd) => larder::cli::commands::item::run(cmd, &global),
        Commands::Pantry(cmd) => larder::cli::commands::pantry::run(cmd, &global),
        Commands::Shop(cmd) => larder::cli::commands::shop::run(cmd, &global),
        Commands::Notify(cmd) => larder::cli::commands::notify::run(cmd, &global),
        Commands::Tick(args) => larder::cli::commands::tick::run(args, &global),
        Commands::Store(cmd) => larder::cli::commands::store::run(cmd, &global),
        Commands::Completions(args) => larder::cli::commands::completions::run(args),
    }
}
