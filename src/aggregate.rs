// Pure aggregations over an immutable record slice.
//
// Every function here recomputes from its input; nothing is cached between
// calls. Grouped results come back in ascending key order.
use crate::types::{
    GroupField, GroupTotal, InspectionRecord, Selection, StatusBucket, TopLineMetrics,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Records picked by a `Selection`, in their original order.
pub type FilteredSet<'a> = Vec<&'a InspectionRecord>;

pub fn select_filter<'a>(records: &'a [InspectionRecord], selection: &Selection) -> FilteredSet<'a> {
    match selection {
        Selection::Overall => records.iter().collect(),
        Selection::Consultant(name) => records
            .iter()
            .filter(|r| r.consultant_name == *name)
            .collect(),
    }
}

pub fn top_line_metrics(records: &[&InspectionRecord]) -> TopLineMetrics {
    let mut m = TopLineMetrics::default();
    for r in records {
        m.count += 1;
        m.total_amount += r.amount_charged;
        if r.is_complied() {
            m.complied_count += 1;
            m.complied_amount += r.amount_charged;
        }
    }
    m
}

/// Sum `amount_charged` per distinct value of `field`.
pub fn group_sum(records: &[&InspectionRecord], field: GroupField) -> Vec<GroupTotal> {
    grouped(records, field)
        .into_iter()
        .map(|(key, (_, total_amount))| GroupTotal {
            key: key.to_string(),
            total_amount,
        })
        .collect()
}

/// Case count and amount per distinct status.
pub fn status_distribution(records: &[&InspectionRecord]) -> Vec<StatusBucket> {
    grouped(records, GroupField::ByStatus)
        .into_iter()
        .map(|(status, (count, sum_amount))| StatusBucket {
            status: status.to_string(),
            count,
            sum_amount,
        })
        .collect()
}

fn grouped<'a>(
    records: &[&'a InspectionRecord],
    field: GroupField,
) -> BTreeMap<&'a str, (usize, Decimal)> {
    let mut map: BTreeMap<&'a str, (usize, Decimal)> = BTreeMap::new();
    for &r in records {
        let e = map.entry(field.key(r)).or_insert((0, Decimal::ZERO));
        e.0 += 1;
        e.1 += r.amount_charged;
    }
    tracing::debug!(field = ?field, groups = map.len(), "grouped records");
    map
}
