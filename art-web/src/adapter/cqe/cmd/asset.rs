use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{double_option, not_blank};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AssetSaveCmd {
    pub asset_code: Option<String>,
    pub serial_number: Option<String>,
    /// model number label, not its id
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub model_number: Option<String>,
    pub assigned_to: Option<i32>,
    pub purchase_date: Option<NaiveDate>,
    pub verified: Option<bool>,
    pub notes: Option<String>,
    pub specs: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AssetUpdateCmd {
    pub asset_code: Option<String>,
    pub serial_number: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub model_number: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<i32>>,
    pub purchase_date: Option<NaiveDate>,
    pub verified: Option<bool>,
    pub notes: Option<String>,
    pub specs: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_owner_is_not_absent_owner() {
        let cmd: AssetUpdateCmd = serde_json::from_str(r#"{"assigned_to": null}"#).unwrap();
        assert_eq!(cmd.assigned_to, Some(None));
        let cmd: AssetUpdateCmd = serde_json::from_str(r#"{"notes": "ok"}"#).unwrap();
        assert_eq!(cmd.assigned_to, None);
    }

    #[test]
    fn model_number_required() {
        let err = AssetSaveCmd::default().validate().unwrap_err();
        assert!(err.field_errors().contains_key("model_number"));
    }
}
