// Margin report export
//
// Two sheets: "Summary" (one row of package identity + totals) and
// "Dettaglio" (one row per included item). Presentation snapshot only.

use std::path::Path;

use listino_recon::MarginReport;
use rust_xlsxwriter::{Format, Workbook};

const SUMMARY_HEADERS: [&str; 8] = [
    "regione",
    "tipo_installazione",
    "distanza",
    "numero_installazioni",
    "margine_unitario",
    "margine_lordo_totale",
    "rebate",
    "guadagno_netto",
];

const DETAIL_HEADERS: [&str; 6] = [
    "item_id",
    "attivita",
    "cliente_unit",
    "partner_unit",
    "margine_unit",
    "margine_totale",
];

pub fn export_report(report: &MarginReport, path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let summary = workbook.add_worksheet();
    summary.set_name("Summary").map_err(|e| e.to_string())?;
    for (col, header) in SUMMARY_HEADERS.iter().enumerate() {
        summary
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| e.to_string())?;
    }
    summary.write_string(1, 0, &report.region).map_err(|e| e.to_string())?;
    summary.write_string(1, 1, &report.block).map_err(|e| e.to_string())?;
    summary.write_string(1, 2, &report.distance).map_err(|e| e.to_string())?;
    summary
        .write_number(1, 3, f64::from(report.quantity))
        .map_err(|e| e.to_string())?;
    summary.write_number(1, 4, report.unit_margin).map_err(|e| e.to_string())?;
    summary.write_number(1, 5, report.gross_margin).map_err(|e| e.to_string())?;
    summary.write_number(1, 6, report.rebate).map_err(|e| e.to_string())?;
    summary.write_number(1, 7, report.net_profit).map_err(|e| e.to_string())?;

    let detail = workbook.add_worksheet();
    detail.set_name("Dettaglio").map_err(|e| e.to_string())?;
    for (col, header) in DETAIL_HEADERS.iter().enumerate() {
        detail
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| e.to_string())?;
    }
    for (i, line) in report.lines.iter().enumerate() {
        let row = (i + 1) as u32;
        detail.write_string(row, 0, &line.item_id).map_err(|e| e.to_string())?;
        detail
            .write_string(row, 1, &line.full_activity)
            .map_err(|e| e.to_string())?;
        detail
            .write_number(row, 2, line.client_unit)
            .map_err(|e| e.to_string())?;
        if let Some(partner_unit) = line.partner_unit {
            detail.write_number(row, 3, partner_unit).map_err(|e| e.to_string())?;
        }
        detail
            .write_number(row, 4, line.margin_unit)
            .map_err(|e| e.to_string())?;
        detail
            .write_number(row, 5, line.margin_total)
            .map_err(|e| e.to_string())?;
    }

    workbook.save(path).map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use listino_recon::model::MarginLine;

    fn sample_report() -> MarginReport {
        MarginReport {
            region: "Lombardia".into(),
            block: "Installazione Wallbox 7,4 kW monofase".into(),
            distance: "2 mt. dal contatore".into(),
            quantity: 2,
            lines: vec![
                MarginLine {
                    item_id: "1".into(),
                    full_activity: "Item 1: posa cavo".into(),
                    client_unit: 150.0,
                    partner_unit: Some(100.0),
                    margin_unit: 50.0,
                    margin_total: 100.0,
                },
                MarginLine {
                    item_id: "2".into(),
                    full_activity: "Item 2: quadro".into(),
                    client_unit: 60.0,
                    partner_unit: None,
                    margin_unit: 60.0,
                    margin_total: 120.0,
                },
            ],
            partner_total_override: None,
            unit_margin: 110.0,
            gross_margin: 220.0,
            rebate_fraction: 0.05,
            rebate: 11.0,
            net_profit: 209.0,
            has_negative_margin: false,
        }
    }

    #[test]
    fn export_writes_summary_and_detail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        export_report(&sample_report(), &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Summary", "Dettaglio"]);

        let summary = workbook.worksheet_range("Summary").unwrap();
        assert_eq!(
            summary.get_value((1, 0)),
            Some(&Data::String("Lombardia".into()))
        );
        assert_eq!(summary.get_value((1, 5)), Some(&Data::Float(220.0)));
        assert_eq!(summary.get_value((1, 7)), Some(&Data::Float(209.0)));

        let detail = workbook.worksheet_range("Dettaglio").unwrap();
        assert_eq!(detail.get_value((1, 0)), Some(&Data::String("1".into())));
        assert_eq!(detail.get_value((1, 3)), Some(&Data::Float(100.0)));
        // Absent partner price stays an empty cell, not zero
        assert!(matches!(detail.get_value((2, 3)), None | Some(&Data::Empty)));
    }
}
