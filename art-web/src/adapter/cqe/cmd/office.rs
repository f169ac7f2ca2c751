use serde::Deserialize;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OfficeBlockCmd {
    #[validate(
        required(message = "This field is required."),
        length(max = 50, message = "Ensure this field has no more than 50 characters."),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OfficeFloorCmd {
    #[validate(
        required(message = "This field is required."),
        range(min = 0, message = "Ensure this value is greater than or equal to 0.")
    )]
    pub number: Option<i32>,
    #[validate(required(message = "This field is required."))]
    pub block_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OfficeSectionCmd {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub floor_id: Option<i32>,
}
