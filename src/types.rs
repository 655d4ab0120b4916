use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Status value that feeds the complied counters.
pub const COMPLIED: &str = "Complied";

/// Sentinel selection meaning "all records".
pub const OVERALL_ANALYSIS: &str = "Overall Analysis";

/// Column names the input file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Consultant Name",
    "LGA",
    "Type of Facilities",
    "Status",
    "Amount Charged",
];

#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Consultant Name")]
    pub consultant_name: Option<String>,
    #[serde(rename = "LGA")]
    pub lga: Option<String>,
    #[serde(rename = "Type of Facilities")]
    pub facility_type: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Amount Charged")]
    pub amount_charged: Option<String>,
}

/// One validated inspection row. Text fields are trimmed and non-empty,
/// `amount_charged` is non-negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionRecord {
    pub consultant_name: String,
    pub lga: String,
    pub facility_type: String,
    pub status: String,
    pub amount_charged: Decimal,
}

impl InspectionRecord {
    pub fn is_complied(&self) -> bool {
        self.status == COMPLIED
    }
}

/// Dimensions a record set can be grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    ByConsultant,
    ByLga,
    ByFacilityType,
    ByStatus,
}

impl GroupField {
    pub fn key<'a>(&self, record: &'a InspectionRecord) -> &'a str {
        match self {
            GroupField::ByConsultant => &record.consultant_name,
            GroupField::ByLga => &record.lga,
            GroupField::ByFacilityType => &record.facility_type,
            GroupField::ByStatus => &record.status,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GroupField::ByConsultant => "Consultant",
            GroupField::ByLga => "LGA",
            GroupField::ByFacilityType => "Facility Type",
            GroupField::ByStatus => "Status",
        }
    }
}

/// What the user asked to look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Overall,
    Consultant(String),
}

impl Selection {
    /// Any value other than the sentinel is taken as a consultant name as-is.
    pub fn from_input(value: &str) -> Self {
        if value == OVERALL_ANALYSIS {
            Selection::Overall
        } else {
            Selection::Consultant(value.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::Overall => OVERALL_ANALYSIS,
            Selection::Consultant(name) => name.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TopLineMetrics {
    pub count: usize,
    pub complied_count: usize,
    pub total_amount: Decimal,
    pub complied_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBucket {
    pub status: String,
    pub count: usize,
    pub sum_amount: Decimal,
}

/// Everything shown for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub selection: String,
    pub metrics: TopLineMetrics,
    pub expected_revenue: Decimal,
    /// Only present for the overall view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_consultant: Option<Vec<GroupTotal>>,
    pub by_lga: Vec<GroupTotal>,
    pub by_facility_type: Vec<GroupTotal>,
    pub status_distribution: Vec<StatusBucket>,
}

#[derive(Debug, Tabled, Clone)]
pub struct KpiRow {
    #[tabled(rename = "Total Inspected Companies")]
    pub total_companies: String,
    #[tabled(rename = "Total Amount Charged")]
    pub total_amount: String,
    #[tabled(rename = "Total Complied Facilities")]
    pub total_complied: String,
    #[tabled(rename = "Total Amount from Complied Facilities")]
    pub complied_amount: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct RevenueRow {
    #[tabled(rename = "Group")]
    pub key: String,
    #[tabled(rename = "Amount Charged")]
    pub amount: String,
}

#[derive(Debug, Tabled, Clone)]
pub struct StatusRow {
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Cases")]
    pub count: String,
    #[tabled(rename = "Share")]
    pub share: String,
    #[tabled(rename = "Sum of Amount")]
    pub sum_amount: String,
}
