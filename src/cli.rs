//! CLI argument parsing

use clap::Parser;
use spixfer_linux_spi::MAX_MODE;
use std::path::PathBuf;

/// Example invocations and what they do, for `--help` and the man page
pub const EXAMPLES: &[(&str, &str)] = &[
    (
        "spixfer /dev/spidev0.0 4.1M 0A1B2C",
        "Clock out three bytes at 4.1 MHz",
    ),
    (
        "spixfer /dev/spidev0.0 500K AABB 100 CCDD",
        "Two transfers at 500 kHz with a 100 ns pause between them",
    ),
    (
        "spixfer --mode 3 /dev/spidev1.0 1M 9F000000",
        "Read a flash JEDEC ID in SPI mode 3",
    ),
];

fn examples_help() -> String {
    let mut help = String::from("Examples:");
    for (command, description) in EXAMPLES {
        help.push_str(&format!("\n  {}\n      {}", command, description));
    }
    help
}

#[derive(Parser, Debug)]
#[command(name = "spixfer")]
#[command(
    author,
    version,
    about = "Send and receive bytes over a Linux spidev device",
    long_about = "Send and receive bytes over a Linux spidev device.\n\n\
        Each HEX_PAYLOAD is clocked out as one full-duplex transfer and both \
        the transmitted (MOSI) and received (MISO) bytes are printed. A \
        positive integer following a payload is a delay in nanoseconds \
        applied after that transfer.",
    after_help = examples_help()
)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// SPI mode (0-3) to set on the device before transferring
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_MODE)))]
    pub mode: Option<u8>,

    /// Reject non-hex payload characters and non-numeric delay tokens
    #[arg(long)]
    pub strict: bool,

    /// SPI device path (e.g. /dev/spidev0.0)
    pub device: PathBuf,

    /// Clock speed in Hz, optionally suffixed with K or M (e.g. 500K, 4.1M)
    #[arg(allow_hyphen_values = true)]
    pub clock_speed: String,

    /// Hex data to send (up to 256 bytes each), optionally followed by a delay in ns
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "HEX_PAYLOAD [DELAY_NS]"
    )]
    pub payloads: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["spixfer", "/dev/spidev0.0", "1M", "0A0B"]).unwrap();
        assert_eq!(cli.device, PathBuf::from("/dev/spidev0.0"));
        assert_eq!(cli.clock_speed, "1M");
        assert_eq!(cli.payloads, ["0A0B"]);
        assert_eq!(cli.mode, None);
        assert!(!cli.strict);
    }

    #[test]
    fn test_parse_stream_with_negative_token() {
        let cli = Cli::try_parse_from([
            "spixfer",
            "/dev/spidev0.0",
            "500K",
            "AABB",
            "-5",
            "CCDD",
        ])
        .unwrap();
        assert_eq!(cli.payloads, ["AABB", "-5", "CCDD"]);
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from([
            "spixfer",
            "-vv",
            "--mode",
            "3",
            "--strict",
            "/dev/spidev1.0",
            "1M",
            "FF",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.mode, Some(3));
        assert!(cli.strict);
    }

    #[test]
    fn test_too_few_arguments() {
        let err = Cli::try_parse_from(["spixfer", "/dev/spidev0.0", "1M"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
        assert!(Cli::try_parse_from(["spixfer", "/dev/spidev0.0"]).is_err());
    }

    #[test]
    fn test_examples_parse() {
        for (command, _) in EXAMPLES {
            let cli = Cli::try_parse_from(command.split_whitespace());
            assert!(cli.is_ok(), "example does not parse: {}", command);
        }
    }

    #[test]
    fn test_examples_in_help() {
        let help = examples_help();
        assert!(help.starts_with("Examples:"));
        for (command, description) in EXAMPLES {
            assert!(help.contains(command));
            assert!(help.contains(description));
        }
    }

    #[test]
    fn test_mode_out_of_range() {
        assert!(Cli::try_parse_from(["spixfer", "--mode", "4", "/dev/spidev0.0", "1M", "00"]).is_err());
    }
}
