use bno055_euler::{
    bus, BringUpConfig, Bno055, ChipIdPolicy, Constants, TelemetryConfig, TelemetryLoop,
    ThreadDelay,
};
use clap::Parser;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(about = "Bring up a BNO055 and print its fused Euler angles")]
struct Args {
    /// I2C character device
    #[clap(short, long, default_value = "/dev/i2c-1")]
    bus: String,
    /// 7-bit device address, hex (0x28) or decimal
    #[clap(short, long, default_value = "0x28", value_parser = parse_address)]
    address: u16,
    /// Pause between samples in milliseconds
    #[clap(short, long, default_value_t = 10)]
    interval_ms: u32,
    /// Stop after this many samples instead of running forever
    #[clap(short = 'n', long)]
    samples: Option<u64>,
    /// Chip ID reads to wait for the chip after a reset
    #[clap(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    poll_attempts: u32,
    /// Abort when the chip ID does not match instead of carrying on
    #[clap(long)]
    strict_chip_id: bool,
}

fn parse_address(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    }
    .map_err(|e| format!("invalid address '{}': {}", s, e))?;

    if parsed > 0x7F {
        return Err(format!("address {:#04x} is not a 7-bit I2C address", parsed));
    }
    Ok(parsed)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.address != Constants::DefaultI2cAddr as u16 {
        info!("Using non-default address {:#04x}", args.address);
    }

    let i2c = bus::open(&args.bus, args.address)?;
    let config = BringUpConfig {
        chip_id_policy: if args.strict_chip_id {
            ChipIdPolicy::Strict
        } else {
            ChipIdPolicy::Warn
        },
        reset_poll_attempts: args.poll_attempts,
    };

    let mut delay = ThreadDelay;
    let mut imu = Bno055::bring_up(i2c, &mut delay, &config)?;

    info!("Reading Euler angles from {}", args.bus);
    let telemetry = TelemetryLoop::new(TelemetryConfig {
        interval_ms: args.interval_ms,
        max_samples: args.samples,
    });
    let stats = telemetry.run(&mut imu, &mut delay, &mut io::stdout().lock())?;
    info!(
        "Done: {} samples printed, {} failed reads",
        stats.emitted, stats.failed
    );
    Ok(())
}
