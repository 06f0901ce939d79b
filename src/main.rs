//! spixfer - Send and receive bytes over a Linux spidev device
//!
//! Opens `/dev/spidevX.Y`, performs one full-duplex transfer per hex payload
//! given on the command line and prints what went out on MOSI and what came
//! back on MISO:
//!
//! ```text
//! $ spixfer /dev/spidev0.0 1M 9F000000
//! <MOSI> 9F 00 00 00
//! <MISO> FF EF 40 18
//! ```
//!
//! A positive integer after a payload delays the next step by that many
//! nanoseconds. Any error ends the run with exit status 1; usage errors are
//! reported by clap before the device is touched.

mod cli;
mod transfer;

use clap::Parser;
use cli::Cli;
use spixfer_core::speed::{parse_clock_speed, to_speed_hz};
use spixfer_linux_spi::{LinuxSpi, LinuxSpiConfig};
use std::io;
use transfer::RunOptions;

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Open the device and run every transfer
///
/// The device is closed when `spi` goes out of scope, before `main` exits.
fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let clock_speed = parse_clock_speed(&cli.clock_speed);
    let speed_hz = to_speed_hz(clock_speed);
    if speed_hz == 0 {
        log::warn!(
            "Clock speed {:?} parsed as 0 Hz, the controller default will be used",
            cli.clock_speed
        );
    }
    log::info!("Clock speed: {} Hz", speed_hz);

    let mut spi = match cli.mode {
        Some(mode) => LinuxSpi::open(&LinuxSpiConfig::new(&cli.device).with_mode(mode))?,
        None => LinuxSpi::open_device(&cli.device)?,
    };

    let options = RunOptions {
        speed_hz,
        strict: cli.strict,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let completed = transfer::run_transfers(&mut spi, &mut out, &cli.payloads, options)?;

    log::info!("Completed {} transfer(s)", completed);
    Ok(())
}
