pub mod import;
pub mod lifecycle;
