// Partner-price override sources
//
// Two mutually exclusive correction schemas: per-item fixed prices, or one
// fixed total per package. A computation uses at most one of them.

use std::collections::BTreeMap;

use crate::error::ReconError;
use crate::model::{PriceKey, ReconRow};

/// Package-total lookup key. `region` is present only when the source CSV
/// carried a non-empty `region` cell for that row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TotalKey {
    pub region: Option<String>,
    pub block: String,
    pub distance: String,
}

/// Effective partner price source.
#[derive(Debug, Clone)]
pub enum OverrideSource {
    /// (block, distance, item_id) -> fixed price, replacing one row's
    /// effective partner price.
    LineItem(BTreeMap<PriceKey, f64>),
    /// (region?, block, distance) -> fixed total, replacing the summed
    /// partner total for the whole package.
    PackageTotal(BTreeMap<TotalKey, f64>),
}

// ---------------------------------------------------------------------------
// CSV loaders
// ---------------------------------------------------------------------------

const LINE_ITEM_COLUMNS: [&str; 4] = ["block", "distance", "item_id", "fixed_price"];
const PACKAGE_TOTAL_COLUMNS: [&str; 3] = ["block", "distance", "partner_total_override"];

/// Load a line-item override CSV: columns `block,distance,item_id,fixed_price`.
///
/// Missing columns fail fast naming every absent one; rows whose
/// `fixed_price` does not coerce to a number are dropped.
pub fn load_line_item_csv(data: &str) -> Result<OverrideSource, ReconError> {
    let (headers, records) = read_records(data)?;
    let idx = require_columns(&headers, &LINE_ITEM_COLUMNS)?;

    let mut map = BTreeMap::new();
    for record in records {
        let get = |i: usize| record.get(idx[i]).unwrap_or("").trim().to_string();
        let Ok(fixed_price) = record.get(idx[3]).unwrap_or("").trim().parse::<f64>() else {
            continue;
        };
        if !fixed_price.is_finite() {
            continue;
        }
        map.insert(
            PriceKey {
                block: get(0),
                distance: get(1),
                item_id: get(2),
            },
            fixed_price,
        );
    }
    Ok(OverrideSource::LineItem(map))
}

/// Load a package-total override CSV: columns
/// `block,distance,partner_total_override`, optional `region`.
pub fn load_package_total_csv(data: &str) -> Result<OverrideSource, ReconError> {
    let (headers, records) = read_records(data)?;
    let idx = require_columns(&headers, &PACKAGE_TOTAL_COLUMNS)?;
    let region_idx = headers.iter().position(|h| h == "region");

    let mut map = BTreeMap::new();
    for record in records {
        let Ok(total) = record.get(idx[2]).unwrap_or("").trim().parse::<f64>() else {
            continue;
        };
        if !total.is_finite() {
            continue;
        }
        let region = region_idx
            .and_then(|ri| record.get(ri))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        map.insert(
            TotalKey {
                region,
                block: record.get(idx[0]).unwrap_or("").trim().to_string(),
                distance: record.get(idx[1]).unwrap_or("").trim().to_string(),
            },
            total,
        );
    }
    Ok(OverrideSource::PackageTotal(map))
}

fn read_records(data: &str) -> Result<(Vec<String>, Vec<csv::StringRecord>), ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ReconError::Io(e.to_string()))?;
    Ok((headers, records))
}

/// Column names are exact and case-sensitive, as documented.
fn require_columns(headers: &[String], required: &[&str]) -> Result<Vec<usize>, ReconError> {
    let mut indices = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for name in required {
        match headers.iter().position(|h| h == name) {
            Some(i) => indices.push(i),
            None => missing.push(name.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(ReconError::MissingColumns { columns: missing });
    }
    Ok(indices)
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// Substitute line-item fixed prices into `partner_price_effective`.
/// Rows without an override keep the joined value.
pub fn apply_line_item(rows: &mut [ReconRow], map: &BTreeMap<PriceKey, f64>) {
    for row in rows.iter_mut() {
        if let Some(fixed) = map.get(&row.key()) {
            row.partner_price_effective = Some(*fixed);
        }
    }
}

/// Fixed package total, if one was supplied for this package. The regional
/// key wins over the region-less key when both exist.
pub fn package_total_for(
    map: &BTreeMap<TotalKey, f64>,
    region: &str,
    block: &str,
    distance: &str,
) -> Option<f64> {
    let with_region = TotalKey {
        region: Some(region.trim().to_string()),
        block: block.trim().to_string(),
        distance: distance.trim().to_string(),
    };
    if let Some(total) = map.get(&with_region) {
        return Some(*total);
    }
    map.get(&TotalKey {
        region: None,
        ..with_region
    })
    .copied()
}
