//! sea-orm entities

use chrono::Local;

pub mod allocation_history;
pub mod asset;
pub mod asset_category;
pub mod asset_condition;
pub mod asset_incident_report;
pub mod asset_log;
pub mod asset_make;
pub mod asset_model_number;
pub mod asset_specs;
pub mod asset_status;
pub mod asset_sub_category;
pub mod asset_type;
pub mod office_block;
pub mod office_floor;
pub mod office_floor_section;
pub mod security_user;
pub mod user;
pub mod user_feedback;

pub(crate) fn now() -> chrono::DateTime<Local> {
    Local::now()
}

/// Current value of an active model field, if it carries one.
pub(crate) fn value_of<V: Clone + Into<sea_orm::Value>>(v: &sea_orm::ActiveValue<V>) -> Option<V> {
    match v {
        sea_orm::ActiveValue::Set(v) | sea_orm::ActiveValue::Unchanged(v) => Some(v.clone()),
        sea_orm::ActiveValue::NotSet => None,
    }
}
