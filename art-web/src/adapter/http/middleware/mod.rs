mod auth;
mod headers;

pub use auth::*;
pub use headers::*;
