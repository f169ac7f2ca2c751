use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct UserVO {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub cohort: Option<i32>,
    pub slack_handle: Option<String>,
    pub phone_number: Option<String>,
    pub picture: Option<String>,
    pub is_staff: bool,
    pub is_active: bool,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct SecurityUserVO {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub badge_number: String,
}
