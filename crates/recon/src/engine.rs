use listino_engine::PriceRow;

use crate::config::ComputeConfig;
use crate::error::ReconError;
use crate::join::join_tables;
use crate::margin::{compute_margin, MarginSettings};
use crate::model::{PackageKey, ReconMeta, ReconResult, ReconSummary};
use crate::overrides::{apply_line_item, package_total_for, OverrideSource};

/// Parsed price tables for one computation. Client and partner are parsed
/// independently from their own source files.
#[derive(Debug)]
pub struct ReconInput {
    pub client: Vec<PriceRow>,
    pub partner: Vec<PriceRow>,
}

/// Run one reconciliation per config: join, apply the override source,
/// restrict to the selected package and included items, compute margins.
pub fn run(
    config: &ComputeConfig,
    input: &ReconInput,
    override_source: Option<&OverrideSource>,
) -> Result<ReconResult, ReconError> {
    let joined = join_tables(&input.client, &input.partner)?;
    let mut rows = joined.rows;

    let mut partner_total_override = None;
    match override_source {
        Some(OverrideSource::LineItem(map)) => apply_line_item(&mut rows, map),
        Some(OverrideSource::PackageTotal(map)) => {
            partner_total_override =
                package_total_for(map, &config.region, &config.block, &config.distance);
        }
        None => {}
    }

    let in_package: Vec<_> = rows
        .iter()
        .filter(|r| r.block == config.block && r.distance == config.distance)
        .cloned()
        .collect();
    if in_package.is_empty() {
        return Err(ReconError::UnknownPackage {
            block: config.block.clone(),
            distance: config.distance.clone(),
        });
    }

    let included: Vec<_> = match &config.include {
        Some(ids) => in_package
            .iter()
            .filter(|r| ids.iter().any(|id| id == &r.item_id))
            .cloned()
            .collect(),
        None => in_package,
    };

    let report = compute_margin(
        &config.region,
        &config.block,
        &config.distance,
        &included,
        partner_total_override,
        MarginSettings {
            quantity: config.quantity,
            rebate_fraction: config.rebate_fraction,
        },
    )?;

    let summary = ReconSummary {
        client_rows: input.client.len(),
        partner_rows: input.partner.len(),
        unmatched_rows: joined.unmatched,
        included_items: report.lines.len(),
        negative_margin_items: report.lines.iter().filter(|l| l.margin_unit < 0.0).count(),
    };

    Ok(ReconResult {
        meta: ReconMeta {
            region: config.region.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
        report,
    })
}

/// Distinct (block, distance) packages of a parsed table, in first-seen order.
pub fn packages(rows: &[PriceRow]) -> Vec<PackageKey> {
    let mut out: Vec<PackageKey> = Vec::new();
    for row in rows {
        let key = PackageKey {
            block: row.block.clone(),
            distance: row.distance.clone(),
        };
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}
