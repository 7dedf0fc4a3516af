use std::{num::NonZeroUsize, path::PathBuf};

use clap::{Parser, Subcommand};
use f1telemetry::{
    AppConfig, Channel, F1TelemetryError, TelemetrySample, compare_drivers,
    comparison::{driver_card, driver_laps},
    compute_binned_lap_averages, compute_chart_series, compute_lap_statistics, loader,
    openf1::build_session_results,
    report::{self, NO_DATA_MESSAGE},
    writer,
};
use itertools::Itertools;
use log::{LevelFilter, error, info, warn};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Config file to use instead of the one in the platform config directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the race weekends in a `meetings` export
    Meetings {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        season: Option<u16>,
    },
    /// List the sessions in a `sessions` export
    Sessions {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// List the drivers in a `drivers` export
    Drivers {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Classification of a session from its `session_result` and `drivers` exports
    Results {
        #[arg(short, long)]
        results: PathBuf,

        #[arg(short, long)]
        drivers: PathBuf,
    },
    /// Lap statistics of one driver
    Stats {
        #[arg(short, long)]
        laps: PathBuf,

        /// Driver number, all records are used when omitted
        #[arg(short = 'n', long)]
        driver: Option<u32>,

        /// `drivers` export used to print the driver's name and team
        #[arg(short, long)]
        drivers: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// Side by side lap statistics of two drivers
    Compare {
        #[arg(short, long)]
        laps: PathBuf,

        #[arg(short, long)]
        drivers: PathBuf,

        #[arg(short = 'a', long)]
        driver_a: u32,

        #[arg(short = 'b', long)]
        driver_b: u32,

        #[arg(long)]
        json: bool,
    },
    /// Chart series of one channel from a `car_data` export
    Telemetry {
        #[arg(short, long)]
        input: PathBuf,

        /// speed, throttle, brake, rpm, n_gear, drs or any other sample key
        #[arg(short = 'm', long)]
        channel: Option<Channel>,

        #[arg(short = 'n', long)]
        driver: Option<u32>,

        /// Average the series per lap window instead of printing every sample
        #[arg(short, long)]
        binned: bool,

        #[arg(short, long)]
        window: Option<NonZeroUsize>,

        /// Write the series as JSON lines instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        save: bool,
    },
}

fn run(cli: &Args, config: &AppConfig) -> Result<(), F1TelemetryError> {
    match &cli.command {
        Commands::Meetings { input, season } => {
            let season = season.unwrap_or(config.default_season);
            if !config.seasons.contains(&season) {
                warn!("Season {season} is not one of the configured seasons");
            }
            let meetings = loader::load_meetings(input, Some(season))?;
            if meetings.is_empty() {
                println!("{NO_DATA_MESSAGE}");
            }
            for meeting in meetings {
                println!("{:>6}  {}", meeting.meeting_key, meeting.display_name());
            }
        }
        Commands::Sessions { input } => {
            let sessions = loader::load_sessions(input)?;
            if sessions.is_empty() {
                println!("{NO_DATA_MESSAGE}");
            }
            for session in sessions {
                println!("{:>6}  {}", session.session_key, session.display_name());
            }
        }
        Commands::Drivers { input } => {
            let drivers = loader::load_drivers(input)?;
            if drivers.is_empty() {
                println!("{NO_DATA_MESSAGE}");
            }
            for driver in drivers {
                println!("{}", report::render_driver_header(&driver));
            }
        }
        Commands::Results { results, drivers } => {
            let drivers = loader::load_drivers(drivers)?;
            let results = loader::load_session_results(results)?;
            let items = build_session_results(&results, &drivers);
            if items.is_empty() {
                println!("{NO_DATA_MESSAGE}");
            }
            for item in items {
                println!("{}", report::render_result_row(&item));
            }
        }
        Commands::Stats {
            laps,
            driver,
            drivers,
            json,
        } => {
            let laps = loader::load_laps(laps)?;
            match (driver, drivers) {
                (Some(number), Some(drivers)) => {
                    let drivers = loader::load_drivers(drivers)?;
                    let card = driver_card(&drivers, &laps, *number)?;
                    if *json {
                        writer::print_json(&card)?;
                    } else {
                        print!("{}", report::render_card("Driver", &card));
                    }
                }
                (driver, drivers) => {
                    if drivers.is_some() {
                        warn!("--drivers is only used together with --driver");
                    }
                    let stats = match driver {
                        Some(number) => compute_lap_statistics(driver_laps(&laps, *number)),
                        None => compute_lap_statistics(&laps),
                    };
                    if *json {
                        writer::print_json(&stats)?;
                    } else {
                        print!("{}", report::render_stats(&stats));
                    }
                }
            }
        }
        Commands::Compare {
            laps,
            drivers,
            driver_a,
            driver_b,
            json,
        } => {
            let drivers = loader::load_drivers(drivers)?;
            let laps = loader::load_laps(laps)?;
            let comparison = compare_drivers(&drivers, &laps, *driver_a, *driver_b)?;
            if *json {
                writer::print_json(&comparison)?;
            } else {
                println!("{}", report::render_card("Driver A", &comparison.driver_a));
                print!("{}", report::render_card("Driver B", &comparison.driver_b));
            }
        }
        Commands::Telemetry {
            input,
            channel,
            driver,
            binned,
            window,
            output,
        } => {
            let samples = loader::load_car_data(input)?;
            let samples: Vec<TelemetrySample> = match driver {
                Some(number) => samples
                    .into_iter()
                    .filter(|s| s.driver_number() == Some(*number))
                    .collect(),
                None => samples,
            };
            let channel = channel
                .clone()
                .unwrap_or_else(|| config.default_channel.clone());
            let series = compute_chart_series(&samples, &channel);

            if *binned {
                let window = window.unwrap_or(config.window_size);
                let averages = compute_binned_lap_averages(series, &channel, window);
                if averages.is_empty() {
                    warn!("No valid {channel} data in {} samples", samples.len());
                }
                match output {
                    Some(path) => writer::write_series(path, averages.averages())?,
                    None => print!("{}", report::render_binned(&channel, &averages)),
                }
            } else {
                let points = series.collect_vec();
                if points.is_empty() {
                    warn!("No {channel} values in {} samples", samples.len());
                }
                match output {
                    Some(path) => writer::write_series(path, &points)?,
                    None => print!("{}", report::render_series(&channel, &points)),
                }
            }
        }
        Commands::Config { save } => {
            writer::print_json(config)?;
            if *save {
                let path = config.save(cli.config.as_deref())?;
                info!("Saved config to {:?}", path);
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Args::parse();

    colog::default_builder()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    let result = AppConfig::load(cli.config.as_deref()).and_then(|config| run(&cli, &config));
    if let Err(e) = result {
        error!("{e}");
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            error!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }
        std::process::exit(1);
    }
}
