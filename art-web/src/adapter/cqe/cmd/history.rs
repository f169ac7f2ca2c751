use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::{choice_error, not_blank};
use crate::common::{AssetStatusEnum, LogTypeEnum};

fn status_choice(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<AssetStatusEnum>()
        .map(|_| ())
        .map_err(|_| choice_error(value))
}

fn log_type_choice(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<LogTypeEnum>()
        .map(|_| ())
        .map_err(|_| choice_error(value))
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AssetStatusCmd {
    #[validate(required(message = "This field is required."))]
    pub asset: Option<i32>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "status_choice")
    )]
    pub current_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AssetConditionCmd {
    #[validate(required(message = "This field is required."))]
    pub asset: Option<i32>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AllocationCmd {
    #[validate(required(message = "This field is required."))]
    pub asset: Option<i32>,
    /// absent or null takes the asset back
    pub current_owner: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AssetLogCmd {
    #[validate(required(message = "This field is required."))]
    pub asset: Option<i32>,
    #[validate(required(message = "This field is required."))]
    pub checked_by: Option<i32>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "log_type_choice")
    )]
    pub log_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn empty_status_payload() {
        let err: AppError = AssetStatusCmd::default().validate().unwrap_err().into();
        let AppError::Validation(map) = err else {
            panic!("expected validation error");
        };
        assert_eq!(map["asset"], vec!["This field is required.".to_string()]);
        assert_eq!(map["current_status"], vec!["This field is required.".to_string()]);
    }

    #[test]
    fn unknown_status() {
        let err: AppError = AssetStatusCmd {
            asset: Some(1),
            current_status: Some("Invalid".to_string()),
        }
        .validate()
        .unwrap_err()
        .into();
        let AppError::Validation(map) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            map["current_status"],
            vec!["\"Invalid\" is not a valid choice.".to_string()]
        );
    }
}
