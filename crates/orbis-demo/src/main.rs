//! Builds a planet from `config.ron` and command-line overrides, then logs a
//! topology report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use orbis_config::{CliArgs, Config, TessellationConfig};
use orbis_tessellation::{CellTargets, Planet, PlanetError, SubdivisionOrders};

mod report;

fn build_planet(settings: &TessellationConfig) -> Result<Planet, PlanetError> {
    match settings.orders {
        Some([global, continental, local]) => {
            let orders = SubdivisionOrders {
                global,
                continental,
                local,
            };
            Planet::create_spherical_with_orders(settings.radius_m, orders)
        }
        None => {
            let targets = CellTargets {
                global_m: settings.global_cell_m,
                continental_m: settings.continental_cell_m,
                local_m: settings.local_cell_m,
            };
            Planet::create_spherical_with(settings.radius_m, &targets)
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("orbis")
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    orbis_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = config.tessellation.validate() {
        tracing::error!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let planet = match build_planet(&config.tessellation) {
        Ok(planet) => planet,
        Err(e) => {
            tracing::error!("Failed to build planet: {e}");
            return ExitCode::FAILURE;
        }
    };

    report::report_summary(&planet);
    report::report_registry();
    report::report_global_topology(&planet);
    report::report_samples(&planet, config.debug.report_samples);

    ExitCode::SUCCESS
}
