use std::path::{Path, PathBuf};

use listino_io::cache::ParseCache;
use listino_io::store::{default_client_path, PartnerStore};
use listino_io::{report, text};
use listino_recon::config::{ComputeConfig, OverrideMode};
use listino_recon::engine::ReconInput;
use listino_recon::overrides::{load_line_item_csv, load_package_total_csv};
use listino_recon::OverrideSource;

use crate::util::format_eur;

pub fn run(
    config_path: &Path,
    client: Option<&Path>,
    store_dir: Option<PathBuf>,
    report_path: Option<&Path>,
    json: bool,
) -> Result<(), String> {
    let config_toml = std::fs::read_to_string(config_path)
        .map_err(|e| format!("cannot read {}: {e}", config_path.display()))?;
    let config = ComputeConfig::from_toml(&config_toml).map_err(|e| e.to_string())?;

    let store = match store_dir {
        Some(dir) => PartnerStore::new(dir),
        None => PartnerStore::default_location(),
    };

    let client_path = client.map(Path::to_path_buf).unwrap_or_else(default_client_path);
    let client_bytes = std::fs::read(&client_path)
        .map_err(|e| format!("cannot read client price list {}: {e}", client_path.display()))?;
    let partner_bytes = store.load(&config.region)?;

    let mut cache = ParseCache::new();
    let input = ReconInput {
        client: cache
            .rows(&client_bytes)
            .map_err(|e| format!("client price list: {e}"))?
            .to_vec(),
        partner: cache
            .rows(&partner_bytes)
            .map_err(|e| format!("partner price list ({}): {e}", config.region))?
            .to_vec(),
    };

    // Override failures degrade to un-overridden prices, with a warning.
    let override_source = match load_override(&config) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("warning: override ignored: {msg}");
            None
        }
    };

    let result =
        listino_recon::run(&config, &input, override_source.as_ref()).map_err(|e| e.to_string())?;

    if result.summary.unmatched_rows > 0 {
        eprintln!(
            "warning: {} client row(s) have no match in the '{}' partner list",
            result.summary.unmatched_rows, config.region
        );
    }
    if result.report.has_negative_margin {
        eprintln!("warning: negative margin (partner price above client price); check lists and overrides");
    }

    if json {
        let out = serde_json::to_string_pretty(&result).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        let r = &result.report;
        println!("{} | {} | {}", r.region, r.block, r.distance);
        println!("installations:   {}", r.quantity);
        println!("included items:  {}", result.summary.included_items);
        println!("unit margin:     {}", format_eur(r.unit_margin));
        println!("gross margin:    {}", format_eur(r.gross_margin));
        println!(
            "rebate ({:.1}%):   {}",
            r.rebate_fraction * 100.0,
            format_eur(r.rebate)
        );
        println!("net profit:      {}", format_eur(r.net_profit));
    }

    if let Some(path) = report_path {
        report::export_report(&result.report, path)?;
        eprintln!("report written to {}", path.display());
    }

    Ok(())
}

fn load_override(config: &ComputeConfig) -> Result<Option<OverrideSource>, String> {
    let Some(ov) = &config.r#override else {
        return Ok(None);
    };
    let data = text::read_file_as_utf8(Path::new(&ov.file))?;
    let source = match ov.mode {
        OverrideMode::LineItem => load_line_item_csv(&data),
        OverrideMode::PackageTotal => load_package_total_csv(&data),
    }
    .map_err(|e| e.to_string())?;
    Ok(Some(source))
}
