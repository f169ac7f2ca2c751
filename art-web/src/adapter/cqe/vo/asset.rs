use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::history::AllocationVO;
use super::user::UserVO;
use crate::common::CheckinStatusEnum;

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct AssetVO {
    pub id: i32,
    pub asset_code: Option<String>,
    pub serial_number: Option<String>,
    pub model_number: String,
    pub make_label: Option<String>,
    pub asset_type: Option<String>,
    pub asset_sub_category: Option<String>,
    pub asset_category: Option<String>,
    pub assigned_to: Option<UserVO>,
    pub purchase_date: Option<NaiveDate>,
    pub current_status: String,
    pub verified: bool,
    pub notes: Option<String>,
    pub specs: Option<i32>,
    pub checkin_status: Option<CheckinStatusEnum>,
    pub allocation_history: Vec<AllocationVO>,
    pub created_at: chrono::DateTime<Local>,
    pub updated_at: chrono::DateTime<Local>,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct AssetSpecsVO {
    pub id: i32,
    pub year_of_manufacture: Option<i32>,
    pub processor_speed: Option<f64>,
    pub screen_size: Option<i32>,
    pub processor_type: Option<String>,
    pub storage: Option<i32>,
    pub memory: Option<i32>,
}

/// Asset counts of one model number, per status.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct AssetHealthVO {
    pub asset_type: Option<String>,
    pub model_number: String,
    pub count_by_status: BTreeMap<String, i64>,
}
