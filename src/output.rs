use crate::types::{
    DashboardView, GroupField, GroupTotal, KpiRow, RevenueRow, StatusBucket, StatusRow,
    OVERALL_ANALYSIS,
};
use crate::util::{format_currency, format_int, format_share};
use anyhow::Context;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Turn a selection label into a file-name-safe stem.
///
/// The overall view is `overall_analysis`. A consultant gets a readable
/// slug plus the first eight hex digits of the SHA-256 of the exact name, so
/// names differing only in case, punctuation or script never share files,
/// e.g. `"A. Bakare"` -> `a_bakare_<hash>`.
pub fn file_stem(label: &str) -> String {
    let mut stem = String::new();
    let mut last_sep = true;
    for c in label.chars() {
        if c.is_alphanumeric() {
            stem.extend(c.to_lowercase());
            last_sep = false;
        } else if !last_sep {
            stem.push('_');
            last_sep = true;
        }
    }
    while stem.ends_with('_') {
        stem.pop();
    }
    if label == OVERALL_ANALYSIS {
        return stem;
    }
    if stem.is_empty() {
        stem.push_str("consultant");
    }
    stem.push('_');
    let digest = Sha256::digest(label.as_bytes());
    for b in &digest[..4] {
        stem.push_str(&format!("{:02x}", b));
    }
    stem
}

/// Write the view as JSON plus one CSV per breakdown into `dir`.
/// Returns the files written.
pub fn export_view(dir: &Path, view: &DashboardView) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let stem = file_stem(&view.selection);
    let mut written = Vec::new();

    let json = dir.join(format!("{}_summary.json", stem));
    write_json(&json, view)?;
    written.push(json);

    if let Some(rows) = &view.by_consultant {
        let p = dir.join(format!("{}_revenue_by_consultant.csv", stem));
        write_csv(&p, rows)?;
        written.push(p);
    }
    let p = dir.join(format!("{}_revenue_by_lga.csv", stem));
    write_csv(&p, &view.by_lga)?;
    written.push(p);

    let p = dir.join(format!("{}_revenue_by_facility_type.csv", stem));
    write_csv(&p, &view.by_facility_type)?;
    written.push(p);

    let p = dir.join(format!("{}_compliance_status.csv", stem));
    write_csv(&p, &view.status_distribution)?;
    written.push(p);

    tracing::info!(selection = %view.selection, files = written.len(), "view exported");
    Ok(written)
}

pub fn kpi_rows(view: &DashboardView) -> Vec<KpiRow> {
    vec![KpiRow {
        total_companies: format_int(view.metrics.count),
        total_amount: format_currency(view.metrics.total_amount),
        total_complied: format_int(view.metrics.complied_count),
        complied_amount: format_currency(view.metrics.complied_amount),
    }]
}

pub fn revenue_rows(groups: &[GroupTotal]) -> Vec<RevenueRow> {
    groups
        .iter()
        .map(|g| RevenueRow {
            key: g.key.clone(),
            amount: format_currency(g.total_amount),
        })
        .collect()
}

pub fn status_rows(buckets: &[StatusBucket]) -> Vec<StatusRow> {
    let total: usize = buckets.iter().map(|b| b.count).sum();
    buckets
        .iter()
        .map(|b| StatusRow {
            status: b.status.clone(),
            count: format_int(b.count),
            share: format_share(b.count, total),
            sum_amount: format_currency(b.sum_amount),
        })
        .collect()
}

pub fn render_table<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows).with(Style::markdown()).to_string()
}

/// Print the whole view to stdout.
pub fn print_dashboard(view: &DashboardView) {
    println!("Ilupeju Fire Prevention Unit");
    println!("Consultant Revenue Dashboard\n");

    println!("Key Performance Indicators\n");
    println!("{}\n", render_table(kpi_rows(view)));

    match &view.by_consultant {
        Some(by_consultant) => {
            println!("Overall Charged Analysis\n");
            println!(
                "Total Expected Revenue: {}\n",
                format_currency(view.expected_revenue)
            );
            print_revenue_section(GroupField::ByConsultant, by_consultant);
        }
        None => {
            println!("Detailed Revenue Analysis for {}\n", view.selection);
            println!(
                "Total Expected Revenue for the Selected Consultant: {}\n",
                format_currency(view.expected_revenue)
            );
        }
    }
    print_revenue_section(GroupField::ByLga, &view.by_lga);
    print_revenue_section(GroupField::ByFacilityType, &view.by_facility_type);

    println!("Compliance Status\n");
    println!("{}\n", render_table(status_rows(&view.status_distribution)));
}

fn print_revenue_section(field: GroupField, groups: &[GroupTotal]) {
    println!("Expected Revenue by {}\n", field.title());
    println!("{}\n", render_table(revenue_rows(groups)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::build_dashboard;
    use crate::types::{InspectionRecord, Selection};
    use rust_decimal::Decimal;

    fn data() -> Vec<InspectionRecord> {
        vec![
            InspectionRecord {
                consultant_name: "A".into(),
                lga: "X".into(),
                facility_type: "Shop".into(),
                status: "Complied".into(),
                amount_charged: Decimal::new(1000, 0),
            },
            InspectionRecord {
                consultant_name: "A".into(),
                lga: "Y".into(),
                facility_type: "Shop".into(),
                status: "Pending".into(),
                amount_charged: Decimal::new(500, 0),
            },
        ]
    }

    #[test]
    fn file_stems_are_safe() {
        assert_eq!(file_stem("Overall Analysis"), "overall_analysis");
        let stem = file_stem("Engr. O.  Bakare");
        assert!(stem.starts_with("engr_o_bakare_"), "{}", stem);
        assert_eq!(stem.len(), "engr_o_bakare_".len() + 8);
        assert!(stem.chars().all(|c| c.is_alphanumeric() || c == '_'));
        assert!(file_stem("***").starts_with("consultant_"));
    }

    #[test]
    fn similar_consultant_names_get_distinct_stems() {
        let names = ["A. Bakare", "A Bakare", "a bakare", "Адебайо", "Адебайо Б", "***", "+++"];
        let stems: std::collections::HashSet<String> = names.iter().map(|n| file_stem(n)).collect();
        assert_eq!(stems.len(), names.len());
        assert!(file_stem("Адебайо").starts_with("адебайо_"));
        assert_eq!(file_stem("A. Bakare"), file_stem("A. Bakare"));
    }

    #[test]
    fn kpis_are_formatted_for_display() {
        let view = build_dashboard(&data(), &Selection::Overall);
        let rows = kpi_rows(&view);
        assert_eq!(rows[0].total_companies, "2");
        assert_eq!(rows[0].total_amount, "₦1,500.00");
        assert_eq!(rows[0].total_complied, "1");
        assert_eq!(rows[0].complied_amount, "₦1,000.00");
    }

    #[test]
    fn status_rows_carry_shares() {
        let view = build_dashboard(&data(), &Selection::Overall);
        let rows = status_rows(&view.status_distribution);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].share, "50.0%");
        assert_eq!(rows[1].sum_amount, "₦500.00");
    }

    #[test]
    fn empty_breakdown_renders_placeholder() {
        assert_eq!(render_table(Vec::<RevenueRow>::new()), "(no rows)");
        let table = render_table(revenue_rows(&[GroupTotal {
            key: "X".into(),
            total_amount: Decimal::new(1000, 0),
        }]));
        assert!(table.contains("| X"));
        assert!(table.contains("₦1,000.00"));
    }

    #[test]
    fn export_writes_summary_and_breakdowns() {
        let dir = std::env::temp_dir().join(format!("revenue_dashboard_export_{}", std::process::id()));
        let view = build_dashboard(&data(), &Selection::Overall);
        let files = export_view(&dir, &view).unwrap();
        assert_eq!(files.len(), 5);
        let json = std::fs::read_to_string(dir.join("overall_analysis_summary.json")).unwrap();
        assert!(json.contains("\"selection\": \"Overall Analysis\""));
        let lga = std::fs::read_to_string(dir.join("overall_analysis_revenue_by_lga.csv")).unwrap();
        assert!(lga.starts_with("key,total_amount"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
