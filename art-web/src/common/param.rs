use serde::{Deserialize, Serialize};
use validator::Validate;

const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;

/// `?page=&size=`, page is 1-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PageQuery {
    pub page: u64,
    pub size: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    /// Zero-based page index and a clamped page size.
    pub fn init(&self) -> (u64, u64) {
        (
            self.page.max(1) - 1,
            self.size.clamp(1, MAX_PAGE_SIZE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_clamps() {
        assert_eq!(PageQuery::default().init(), (0, 20));
        assert_eq!(PageQuery { page: 0, size: 0 }.init(), (0, 1));
        assert_eq!(PageQuery { page: 3, size: 500 }.init(), (2, 100));
    }
}
