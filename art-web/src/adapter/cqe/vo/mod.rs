pub mod asset;
pub mod hierarchy;
pub mod history;
pub mod office;
pub mod report;
pub mod user;
