//! Command-line argument parsing for Orbis tools.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orbis command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orbis", about = "Icosahedral planet tessellation")]
pub struct CliArgs {
    /// Planet radius in meters.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Global subdivision order.
    #[arg(long)]
    pub global_order: Option<u32>,

    /// Continental subdivision order.
    #[arg(long)]
    pub continental_order: Option<u32>,

    /// Local subdivision order.
    #[arg(long)]
    pub local_order: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Any order given on the command line pins all three orders; the ones
    /// not given come from the config file's orders, or 1 if it has none.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(radius) = args.radius {
            self.tessellation.radius_m = radius;
        }
        let overrides = [args.global_order, args.continental_order, args.local_order];
        if overrides.iter().any(Option::is_some) {
            let mut orders = self.tessellation.orders.unwrap_or([1, 1, 1]);
            for (slot, value) in orders.iter_mut().zip(overrides) {
                if let Some(value) = value {
                    *slot = value;
                }
            }
            self.tessellation.orders = Some(orders);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
