mod axum_router;

pub use axum_router::*;

#[cfg(test)]
mod tests;
