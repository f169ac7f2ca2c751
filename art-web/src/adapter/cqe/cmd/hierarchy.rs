use serde::Deserialize;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryCmd {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SubCategoryCmd {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub sub_category_name: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub asset_category_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TypeCmd {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub asset_type: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub asset_sub_category_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MakeCmd {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub make_label: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub asset_type_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ModelNumberCmd {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank")
    )]
    pub model_number: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub make_label_id: Option<i32>,
}
