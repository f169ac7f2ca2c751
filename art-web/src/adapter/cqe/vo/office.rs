use serde::{Deserialize, Serialize};

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct OfficeBlockVO {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct OfficeFloorVO {
    pub id: i32,
    pub number: i32,
    pub block_id: i32,
}

#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct OfficeSectionVO {
    pub id: i32,
    pub name: String,
    pub floor_id: i32,
}
