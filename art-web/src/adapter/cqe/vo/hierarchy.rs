use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct CategoryVO {
    pub id: i32,
    pub category_name: String,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct SubCategoryVO {
    pub id: i32,
    pub sub_category_name: String,
    pub asset_category_id: i32,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct TypeVO {
    pub id: i32,
    pub asset_type: String,
    pub asset_sub_category_id: i32,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct MakeVO {
    pub id: i32,
    pub make_label: String,
    pub asset_type_id: i32,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct ModelNumberVO {
    pub id: i32,
    pub model_number: String,
    pub make_label_id: i32,
}
