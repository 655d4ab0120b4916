use crate::aggregate::{group_sum, select_filter, status_distribution, top_line_metrics};
use crate::types::{DashboardView, GroupField, InspectionRecord, Selection, OVERALL_ANALYSIS};
use std::collections::HashSet;

/// Entries for the consultant picker: the overall sentinel first, then each
/// consultant once, in the order they first appear in the data.
pub fn consultant_options(data: &[InspectionRecord]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut options = vec![OVERALL_ANALYSIS.to_string()];
    for r in data {
        if seen.insert(r.consultant_name.as_str()) {
            options.push(r.consultant_name.clone());
        }
    }
    options
}

/// Compute every figure shown for `selection`.
///
/// The overall view adds a revenue-by-consultant breakdown; a single
/// consultant's view leaves it out. The expected revenue figure is reported
/// for every selection.
pub fn build_dashboard(data: &[InspectionRecord], selection: &Selection) -> DashboardView {
    let filtered = select_filter(data, selection);
    let metrics = top_line_metrics(&filtered);
    tracing::debug!(
        selection = selection.label(),
        records = filtered.len(),
        "building dashboard"
    );

    let by_consultant = match selection {
        Selection::Overall => Some(group_sum(&filtered, GroupField::ByConsultant)),
        Selection::Consultant(_) => None,
    };

    DashboardView {
        selection: selection.label().to_string(),
        metrics,
        expected_revenue: metrics.total_amount,
        by_consultant,
        by_lga: group_sum(&filtered, GroupField::ByLga),
        by_facility_type: group_sum(&filtered, GroupField::ByFacilityType),
        status_distribution: status_distribution(&filtered),
    }
}
