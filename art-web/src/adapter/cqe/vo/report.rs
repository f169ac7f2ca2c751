use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct IncidentReportVO {
    pub id: i32,
    pub asset_id: i32,
    pub incident_type: String,
    pub incident_location: String,
    pub incident_description: String,
    pub injuries_sustained: Option<String>,
    pub loss_of_property: Option<String>,
    pub witnesses: Option<String>,
    pub police_responded: Option<String>,
    pub submitted_by: i32,
    pub created_at: chrono::DateTime<Local>,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct FeedbackVO {
    pub id: i32,
    pub reported_by: i32,
    pub message: String,
    pub report_type: String,
    pub created_at: chrono::DateTime<Local>,
}
