pub mod cqe;
pub mod http;

pub use cqe::*;
