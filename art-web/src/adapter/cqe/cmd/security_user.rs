use serde::Deserialize;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SecurityUserCmd {
    #[validate(
        required(message = "This field is required."),
        email(message = "Enter a valid email address.")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub first_name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub last_name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub phone_number: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub badge_number: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(min = 8, message = "Ensure this field has at least 8 characters.")
    )]
    pub password: Option<String>,
}
