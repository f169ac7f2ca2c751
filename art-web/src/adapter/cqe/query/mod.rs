use serde::Deserialize;
use validator::Validate;

/// `?email=` owner filter on asset lists.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct AssetListQuery {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,
}

/// `?asset=` filter on history lists.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct AssetHistoryQuery {
    pub asset: Option<i32>,
}
