use crate::error::ReconError;
use crate::model::{MarginLine, MarginReport, ReconRow};

/// Operator-configured computation settings, validated by
/// [`crate::config::ComputeConfig`].
#[derive(Debug, Clone, Copy)]
pub struct MarginSettings {
    /// Installations to quote. Positive.
    pub quantity: u32,
    /// Fraction of gross margin returned to the end customer. 0..=1.
    pub rebate_fraction: f64,
}

/// Compute per-item and package margins for the included rows of one package.
///
/// Line-item mode: unit margin = sum of (client - effective partner) per row,
/// a missing partner price counting as zero cost. Package-total mode: unit
/// margin = sum of client prices minus the fixed partner total; per-line
/// margins are not meaningful there and lines carry client prices only.
pub fn compute_margin(
    region: &str,
    block: &str,
    distance: &str,
    included: &[ReconRow],
    partner_total_override: Option<f64>,
    settings: MarginSettings,
) -> Result<MarginReport, ReconError> {
    if included.is_empty() {
        return Err(ReconError::EmptySelection);
    }

    let quantity = f64::from(settings.quantity);
    let mut lines = Vec::with_capacity(included.len());
    let mut unit_margin = 0.0;

    match partner_total_override {
        None => {
            for row in included {
                let partner_unit = row.partner_price_effective;
                let margin_unit = row.client_price - partner_unit.unwrap_or(0.0);
                unit_margin += margin_unit;
                lines.push(MarginLine {
                    item_id: row.item_id.clone(),
                    full_activity: row.full_activity.clone(),
                    client_unit: row.client_price,
                    partner_unit,
                    margin_unit,
                    margin_total: margin_unit * quantity,
                });
            }
        }
        Some(total) => {
            let client_total: f64 = included.iter().map(|r| r.client_price).sum();
            unit_margin = client_total - total;
            for row in included {
                lines.push(MarginLine {
                    item_id: row.item_id.clone(),
                    full_activity: row.full_activity.clone(),
                    client_unit: row.client_price,
                    partner_unit: None,
                    margin_unit: 0.0,
                    margin_total: 0.0,
                });
            }
        }
    }

    let gross_margin = unit_margin * quantity;
    let rebate = gross_margin * settings.rebate_fraction;
    let net_profit = gross_margin - rebate;
    let has_negative_margin =
        unit_margin < 0.0 || lines.iter().any(|l| l.margin_unit < 0.0);

    Ok(MarginReport {
        region: region.to_string(),
        block: block.to_string(),
        distance: distance.to_string(),
        quantity: settings.quantity,
        lines,
        partner_total_override,
        unit_margin,
        gross_margin,
        rebate_fraction: settings.rebate_fraction,
        rebate,
        net_profit,
        has_negative_margin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, client: f64, partner: Option<f64>) -> ReconRow {
        ReconRow {
            block: "BlockX".into(),
            distance: "DistY".into(),
            item_id: id.into(),
            item_desc: String::new(),
            full_activity: format!("Item {id}: attivita"),
            client_price: client,
            partner_price: partner,
            partner_price_effective: partner,
        }
    }

    fn settings(quantity: u32, rebate: f64) -> MarginSettings {
        MarginSettings {
            quantity,
            rebate_fraction: rebate,
        }
    }

    #[test]
    fn line_item_margin_scenario() {
        // client 150 vs partner 100, quantity 2, rebate 5%
        let included = vec![row("1", 150.0, Some(100.0))];
        let report =
            compute_margin("Lombardia", "BlockX", "DistY", &included, None, settings(2, 0.05))
                .unwrap();
        assert_eq!(report.unit_margin, 50.0);
        assert_eq!(report.gross_margin, 100.0);
        assert_eq!(report.rebate, 5.0);
        assert_eq!(report.net_profit, 95.0);
        assert!(!report.has_negative_margin);
        assert_eq!(report.lines[0].margin_total, 100.0);
    }

    #[test]
    fn missing_partner_counts_as_zero_cost() {
        let included = vec![row("1", 150.0, None)];
        let report =
            compute_margin("Lombardia", "BlockX", "DistY", &included, None, settings(1, 0.0))
                .unwrap();
        assert_eq!(report.unit_margin, 150.0);
        assert_eq!(report.lines[0].partner_unit, None);
    }

    #[test]
    fn package_total_replaces_summed_partner() {
        // Partner line prices are ignored entirely once a total is fixed.
        let included = vec![row("1", 150.0, Some(100.0)), row("2", 50.0, Some(40.0))];
        let report = compute_margin(
            "Lombardia",
            "BlockX",
            "DistY",
            &included,
            Some(120.0),
            settings(3, 0.05),
        )
        .unwrap();
        assert_eq!(report.unit_margin, 80.0); // 200 - 120
        assert_eq!(report.gross_margin, 240.0);
        assert_eq!(report.partner_total_override, Some(120.0));
    }

    #[test]
    fn margin_identities_hold() {
        let included = vec![row("1", 123.25, Some(41.5)), row("2", 10.0, Some(2.5))];
        for quantity in [1u32, 2, 7] {
            for rebate in [0.0, 0.05, 0.5, 1.0] {
                let report = compute_margin(
                    "Lazio",
                    "BlockX",
                    "DistY",
                    &included,
                    None,
                    settings(quantity, rebate),
                )
                .unwrap();
                assert_eq!(report.gross_margin, report.unit_margin * f64::from(quantity));
                assert_eq!(report.net_profit, report.gross_margin - report.rebate);
                assert_eq!(report.rebate, report.gross_margin * rebate);
            }
        }
    }

    #[test]
    fn negative_margin_flagged_not_fatal() {
        let included = vec![row("1", 90.0, Some(100.0)), row("2", 50.0, Some(10.0))];
        let report =
            compute_margin("Lazio", "BlockX", "DistY", &included, None, settings(1, 0.05))
                .unwrap();
        assert!(report.has_negative_margin);
        assert_eq!(report.unit_margin, 30.0);
    }

    #[test]
    fn negative_package_total_margin_flagged() {
        let included = vec![row("1", 90.0, None)];
        let report =
            compute_margin("Lazio", "BlockX", "DistY", &included, Some(100.0), settings(1, 0.0))
                .unwrap();
        assert!(report.has_negative_margin);
        assert_eq!(report.unit_margin, -10.0);
    }

    #[test]
    fn empty_selection_blocks_computation() {
        let err = compute_margin("Lazio", "BlockX", "DistY", &[], None, settings(1, 0.05))
            .unwrap_err();
        assert!(matches!(err, ReconError::EmptySelection));
    }
}
