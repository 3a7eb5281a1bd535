use clap::Args;
use lot_check::config::AppConfig;
use lot_check::error::AppError;
use lot_check::parking::{ParkingRequest, ParkingService, ReferenceData, ReferenceDataLoader};
use lot_check::telemetry;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Lot or zone name exactly as it appears in the lots sheet
    #[arg(long)]
    pub(crate) lot: String,
    /// Permit type (or plate) to validate
    #[arg(long)]
    pub(crate) permit: String,
    /// Timestamp of the visit (YYYY-MM-DD HH:MM)
    #[arg(long)]
    pub(crate) date_time: Option<String>,
    /// Requester category such as faculty, staff or student
    #[arg(long)]
    pub(crate) user_type: Option<String>,
    /// Requester displays a disability placard
    #[arg(long)]
    pub(crate) disability_placard: bool,
}

impl From<CheckArgs> for ParkingRequest {
    fn from(args: CheckArgs) -> Self {
        ParkingRequest {
            identifier: args.permit,
            lot_name: args.lot,
            date_time: args.date_time,
            user_type: args.user_type,
            disability_placard: args.disability_placard,
        }
    }
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = ParkingService::with_coin_flip(Arc::new(prepare(&config)?));

    let decision = service.check(&args.into());
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let reference = prepare(&config)?;
    render_catalog(&reference);
    Ok(())
}

/// Installs stderr logging so skipped sheet rows are reported, then loads the sheets.
fn prepare(config: &AppConfig) -> Result<ReferenceData, AppError> {
    telemetry::init_stderr(&config.telemetry)?;
    load_strict(config)
}

/// Command-line runs surface unreadable sheets instead of serving empty data.
fn load_strict(config: &AppConfig) -> Result<ReferenceData, AppError> {
    let catalog = ReferenceDataLoader::lots_from_path(&config.data.lots_csv)?;
    let events = ReferenceDataLoader::events_from_path(&config.data.events_csv)?;
    Ok(ReferenceData::new(catalog, events))
}

fn render_catalog(reference: &ReferenceData) {
    if reference.lots().is_empty() {
        println!("Lots: none");
    } else {
        println!("Lots ({})", reference.lots().len());
        for lot in reference.lots() {
            println!("- {lot}");
        }
    }

    if reference.permits().is_empty() {
        println!("\nPermit types: none");
    } else {
        println!("\nPermit types ({})", reference.permits().len());
        for permit in reference.permits() {
            println!("- {permit}");
        }
    }

    println!(
        "\nSpecial event closures: {} lot-days",
        reference.events().len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use lot_check::config::{
        AppEnvironment, DataConfig, ServerConfig, TelemetryConfig, DEFAULT_EVENTS_CSV,
        DEFAULT_LOTS_CSV,
    };
    use std::path::{Path, PathBuf};

    fn config_for(lots_csv: PathBuf, events_csv: PathBuf) -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 2000,
            },
            telemetry: TelemetryConfig {
                log_level: "warn".to_string(),
            },
            data: DataConfig {
                lots_csv,
                events_csv,
            },
        }
    }

    fn workspace_file(relative: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../..")
            .join(relative)
    }

    #[test]
    fn prepare_installs_logging_and_loads_sample_sheets() {
        let config = config_for(
            workspace_file(DEFAULT_LOTS_CSV),
            workspace_file(DEFAULT_EVENTS_CSV),
        );

        let reference = prepare(&config).expect("sample sheets load");
        assert!(reference.has_lot("Lot A"));
        assert!(!reference.events().is_empty());
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn strict_loading_reports_missing_sheets() {
        let config = config_for(
            workspace_file("data/missing-lots.csv"),
            workspace_file(DEFAULT_EVENTS_CSV),
        );

        let error = load_strict(&config).expect_err("missing sheet is an error");
        assert!(matches!(error, AppError::ReferenceData(_)));
    }
}
