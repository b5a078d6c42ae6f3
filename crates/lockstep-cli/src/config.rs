use clap::Parser;

/// Runtime configuration for the `lockstep` binary.
///
/// Both knobs are parsed from CLI arguments or environment variables. The
/// defaults reproduce the classic demonstration run: three values, one
/// hundred milliseconds apart.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "lockstep",
    version,
    about = "Emit a paced counting sequence to stdout, one value per line"
)]
pub struct CliArgs {
    /// Number of values to emit.
    ///
    /// The sequence is always `1..=count`, delivered in strictly increasing
    /// order. A count of zero is rejected before any output is produced.
    ///
    /// Environment variable: `LOCKSTEP_COUNT`
    #[arg(long, env = "LOCKSTEP_COUNT", default_value_t = 3)]
    pub count: u64,

    /// Delay before each value, in milliseconds.
    ///
    /// Affects latency only: shrinking it (down to zero) never changes the
    /// emitted values or their order.
    ///
    /// Environment variable: `LOCKSTEP_PACE_MS`
    #[arg(long, env = "LOCKSTEP_PACE_MS", default_value_t = 100)]
    pub pace_ms: u64,
}
