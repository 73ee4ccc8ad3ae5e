//! Study runner entry point: CLI wiring and config-driven engine calls.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use enersim::config::StudyConfig;
use enersim::io::export::{export_ranges_csv, export_timeline_csv};
use enersim::payback::{
    PaybackResult, SavingsChartSeries, StorageRecommendation, compute_payback_with,
    generate_savings_chart_series, recommend_storage_size_with,
};
use enersim::range::estimate::CdSource;
use enersim::range::report::compute_all_ranges_with_soc;
use enersim::range::{CardRanges, RangeReport};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "EV range estimation and home-storage payback studies"
)]
struct Cli {
    /// Load study from TOML config file
    #[arg(long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, lfp_compact, no_solar)
    #[arg(long)]
    preset: Option<String>,

    /// Export the range table to CSV
    #[arg(long)]
    ranges_out: Option<PathBuf>,

    /// Export the savings timeline to CSV
    #[arg(long)]
    timeline_out: Option<PathBuf>,

    /// Print results as JSON instead of text reports
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Everything a study produced, for JSON output.
#[derive(Serialize, Default)]
struct StudyReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    cd_source: Option<CdSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ranges: Option<RangeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card: Option<CardRanges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payback: Option<PaybackResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<SavingsChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation: Option<StorageRecommendation>,
}

fn load_study(cli: &Cli) -> StudyConfig {
    // --scenario takes priority, then --preset, then baseline default
    let loaded = if let Some(ref path) = cli.scenario {
        StudyConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        StudyConfig::from_preset(name)
    } else {
        Ok(StudyConfig::baseline())
    };

    match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn run_study(study: &StudyConfig) -> StudyReport {
    let mut report = StudyReport::default();

    if let Some(vehicle) = &study.vehicle {
        // validate() already checked that the vehicle resolves
        let resolved = match vehicle.resolve() {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        };
        info!(
            cd = resolved.params.cd,
            frontal_area_m2 = resolved.params.frontal_area_m2,
            crr = resolved.params.crr,
            "vehicle resolved"
        );
        let ranges = compute_all_ranges_with_soc(&resolved.params, resolved.usable_soc_pct);
        report.card = Some(ranges.card());
        report.ranges = Some(ranges);
        report.cd_source = resolved.cd_source;
    }

    if let Some(household) = &study.household {
        let profile = household.to_profile(&study.assumptions);
        match compute_payback_with(&profile, &study.assumptions) {
            Ok(result) => {
                report.chart = Some(generate_savings_chart_series(&result));
                report.payback = Some(result);
            }
            Err(e) => {
                eprintln!("error: {}: {e}", e.field());
                process::exit(1);
            }
        }
        report.recommendation = Some(recommend_storage_size_with(
            profile.monthly_consumption_kwh,
            profile.solar_system_kwp,
            &study.assumptions,
        ));
    }

    report
}

fn print_text(report: &StudyReport) {
    if let Some(ranges) = &report.ranges {
        if let Some(source) = report.cd_source {
            println!("Cd source: {}", cd_source_label(source));
        }
        println!("{ranges}");
    }
    if let Some(card) = &report.card {
        println!("{card}\n");
    }
    if let Some(payback) = &report.payback {
        println!("{payback}\n");
    }
    if let Some(rec) = &report.recommendation {
        println!(
            "Recommended storage:   {:.0} kWh ({})",
            rec.recommended_size_kwh, rec.reasoning
        );
    }
}

fn cd_source_label(source: CdSource) -> &'static str {
    match source {
        CdSource::Published => "published",
        CdSource::Matched => "matched",
        CdSource::Estimated => "estimated",
        CdSource::Default => "default",
    }
}

fn write_exports(cli: &Cli, report: &StudyReport) {
    if let Some(path) = &cli.ranges_out {
        match &report.ranges {
            Some(ranges) => write_or_exit(path, |p| export_ranges_csv(ranges, p)),
            None => eprintln!("warning: --ranges-out ignored, study has no [vehicle]"),
        }
    }
    if let Some(path) = &cli.timeline_out {
        match &report.payback {
            Some(payback) => write_or_exit(path, |p| export_timeline_csv(payback, p)),
            None => eprintln!("warning: --timeline-out ignored, study has no [household]"),
        }
    }
}

fn write_or_exit(path: &Path, write: impl FnOnce(&Path) -> std::io::Result<()>) {
    if let Err(e) = write(path) {
        eprintln!("error: failed to write CSV: {e}");
        process::exit(1);
    }
    eprintln!("Written to {}", path.display());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let study = load_study(&cli);

    // Validate
    let errors = study.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let report = run_study(&study);

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize report: {e}");
                process::exit(1);
            }
        }
    } else {
        print_text(&report);
    }

    write_exports(&cli, &report);
}
