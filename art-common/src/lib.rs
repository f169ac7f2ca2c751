//! common

mod convert;
mod text;

pub use convert::*;
pub use text::*;
