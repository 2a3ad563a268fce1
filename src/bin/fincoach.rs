use std::io;

use clap::Parser;
use log::LevelFilter;

use fincoach::app::App;
use fincoach::cli::Cli;
use fincoach::coach::CoachConfig;
use fincoach::store::FileStore;

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_target(false)
        .format_timestamp(None)
        .init();

    // Build coach config from environment, then apply CLI overrides
    let coach_config =
        CoachConfig::from_env().with_overrides(cli.coach.api_url.clone(), cli.coach.timeout);

    let store = match &cli.data_dir {
        Some(dir) => FileStore::new(dir.clone()),
        None => FileStore::from_env(),
    };

    let mut app = App::new(store, coach_config);
    let mut stdout = io::stdout();

    if let Err(err) = app.run(cli.command, &mut stdout) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
