use serde::Serialize;

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Natural join key. Unique per parsed table; a partner-side duplicate is an
/// ambiguous join and fails reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PriceKey {
    pub block: String,
    pub distance: String,
    pub item_id: String,
}

/// Operator-selected installation package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PackageKey {
    pub block: String,
    pub distance: String,
}

// ---------------------------------------------------------------------------
// Reconciled rows
// ---------------------------------------------------------------------------

/// A client price row joined against the partner table.
///
/// `partner_price` is the joined value (absent on no match);
/// `partner_price_effective` is the value after override substitution.
#[derive(Debug, Clone, Serialize)]
pub struct ReconRow {
    pub block: String,
    pub distance: String,
    pub item_id: String,
    pub item_desc: String,
    pub full_activity: String,
    pub client_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_price_effective: Option<f64>,
}

impl ReconRow {
    pub fn key(&self) -> PriceKey {
        PriceKey {
            block: self.block.clone(),
            distance: self.distance.clone(),
            item_id: self.item_id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Margin report
// ---------------------------------------------------------------------------

/// One included item with its unit prices and margins.
#[derive(Debug, Clone, Serialize)]
pub struct MarginLine {
    pub item_id: String,
    pub full_activity: String,
    pub client_unit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_unit: Option<f64>,
    pub margin_unit: f64,
    pub margin_total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarginReport {
    pub region: String,
    pub block: String,
    pub distance: String,
    pub quantity: u32,
    pub lines: Vec<MarginLine>,
    /// Set in package-total override mode; replaces the summed partner total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_total_override: Option<f64>,
    pub unit_margin: f64,
    pub gross_margin: f64,
    pub rebate_fraction: f64,
    pub rebate: f64,
    pub net_profit: f64,
    /// Warning flag only; negative margins never block computation.
    pub has_negative_margin: bool,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub client_rows: usize,
    pub partner_rows: usize,
    /// Client rows with no partner-side match. Non-fatal.
    pub unmatched_rows: usize,
    pub included_items: usize,
    pub negative_margin_items: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub region: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    /// The full reconciled table (all packages), in client row order.
    pub rows: Vec<ReconRow>,
    pub report: MarginReport,
}
