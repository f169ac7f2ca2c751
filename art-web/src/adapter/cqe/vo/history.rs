use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct AssetStatusVO {
    pub id: i32,
    /// `"<asset_code> - <serial_number>"`
    pub asset: String,
    pub current_status: String,
    pub previous_status: Option<String>,
    pub created_at: chrono::DateTime<Local>,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct AssetConditionVO {
    pub id: i32,
    pub asset: String,
    pub notes: String,
    pub created_at: chrono::DateTime<Local>,
}

/// Owners are rendered by email.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct AllocationVO {
    pub id: i32,
    pub asset: String,
    pub current_owner: Option<String>,
    pub previous_owner: Option<String>,
    pub created_at: chrono::DateTime<Local>,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct AssetLogVO {
    pub id: i32,
    pub asset: String,
    pub checked_by: String,
    pub log_type: String,
    pub created_at: chrono::DateTime<Local>,
}
