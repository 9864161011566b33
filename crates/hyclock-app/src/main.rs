use std::{backtrace::Backtrace, num::NonZeroUsize, panic, path::PathBuf};

use clap::Parser;
use flexi_logger::{Age, Cleanup, Criterion, FileSpec, LogSpecBuilder, Logger, Naming};
use hyclock_core::{config::get_config, event_bus::EventBus};
use hyclock_gui::{App, get_log_spec};
use log::{debug, error, info};
use masterror::AppError;
use tokio::runtime::Handle;

const EVENT_BUS_CAPACITY: usize = 64;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    config_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> iced::Result {
    let args = Args::parse();

    let logger = Logger::with(
        LogSpecBuilder::new()
            .default(log::LevelFilter::Info)
            .build(),
    )
    .log_to_file(FileSpec::default().directory("/tmp/hyclock"))
    .duplicate_to_stdout(flexi_logger::Duplicate::All)
    .rotate(
        Criterion::Age(Age::Day),
        Naming::Timestamps,
        Cleanup::KeepLogFiles(7),
    );
    let logger = match logger.start() {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            std::process::exit(1);
        }
    };
    panic::set_hook(Box::new(|info| {
        let b = Backtrace::capture();
        error!("Panic: {info} \n {b}");
    }));
    debug!("args: {args:?}");

    let (config, config_path) = get_config(args.config_path).unwrap_or_else(|err| {
        error!("Failed to read config: {}", AppError::from(err));

        std::process::exit(1);
    });
    info!("Using config {config_path:?}");

    logger.set_new_spec(get_log_spec(&config.log_level));

    let bus = EventBus::new(NonZeroUsize::new(EVENT_BUS_CAPACITY).unwrap_or(NonZeroUsize::MIN));

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .run_with(App::new((config, bus.sender(), Handle::current(), bus.receiver())))
}
