//! Page-number pagination.

use crate::error::DomainError;

/// Page size limits applied to list requests.
#[derive(Debug, Clone, Copy)]
pub struct PaginationConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl PaginationConfig {
    /// Resolve a raw `page_size` parameter.
    ///
    /// Missing, unparsable or non-positive values fall back to the default;
    /// oversized values are clamped to the maximum.
    pub fn page_size(&self, raw: Option<&str>) -> u64 {
        raw.and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&size| size > 0)
            .map(|size| size.min(self.max_page_size))
            .unwrap_or(self.default_page_size)
    }
}

/// Requested page, before it is checked against the item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    Number(u64),
    Last,
}

impl PageNumber {
    /// Parse a raw `page` parameter. Absent means the first page.
    pub fn parse(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::Number(1)),
            Some("last") => Ok(Self::Last),
            Some(s) => s
                .parse::<u64>()
                .map(Self::Number)
                .map_err(|_| DomainError::InvalidPage),
        }
    }

    /// Resolve to a 1-based page within `1..=num_pages`.
    pub fn resolve(self, num_pages: u64) -> Result<u64, DomainError> {
        match self {
            Self::Last => Ok(num_pages),
            Self::Number(n) if (1..=num_pages).contains(&n) => Ok(n),
            Self::Number(_) => Err(DomainError::InvalidPage),
        }
    }
}

/// Number of pages for `total` items; an empty listing still has one page.
pub fn num_pages(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size.max(1)).max(1)
}

/// One page of results plus the counts needed to link neighbours.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    pub fn num_pages(&self) -> u64 {
        num_pages(self.total, self.page_size)
    }

    pub fn next_page(&self) -> Option<u64> {
        (self.page < self.num_pages()).then_some(self.page + 1)
    }

    pub fn previous_page(&self) -> Option<u64> {
        (self.page > 1).then_some(self.page - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_defaults_and_clamps() {
        let config = PaginationConfig::default();
        assert_eq!(config.page_size(None), 10);
        assert_eq!(config.page_size(Some("25")), 25);
        assert_eq!(config.page_size(Some("500")), 100);
        assert_eq!(config.page_size(Some("0")), 10);
        assert_eq!(config.page_size(Some("ten")), 10);
    }

    #[test]
    fn page_number_parsing() {
        assert_eq!(PageNumber::parse(None).unwrap(), PageNumber::Number(1));
        assert_eq!(PageNumber::parse(Some("3")).unwrap(), PageNumber::Number(3));
        assert_eq!(PageNumber::parse(Some("last")).unwrap(), PageNumber::Last);
        assert!(matches!(
            PageNumber::parse(Some("abc")),
            Err(DomainError::InvalidPage)
        ));
    }

    #[test]
    fn resolve_checks_range() {
        assert_eq!(PageNumber::Number(2).resolve(3).unwrap(), 2);
        assert_eq!(PageNumber::Last.resolve(3).unwrap(), 3);
        assert!(PageNumber::Number(4).resolve(3).is_err());
        assert!(PageNumber::Number(0).resolve(3).is_err());
    }

    #[test]
    fn empty_listing_has_one_page() {
        assert_eq!(num_pages(0, 10), 1);
        assert_eq!(num_pages(10, 10), 1);
        assert_eq!(num_pages(11, 10), 2);
    }

    #[test]
    fn neighbours() {
        let page = Page {
            items: vec![(); 10],
            total: 25,
            page: 2,
            page_size: 10,
        };
        assert_eq!(page.next_page(), Some(3));
        assert_eq!(page.previous_page(), Some(1));

        let last = Page { page: 3, ..page };
        assert_eq!(last.next_page(), None);
    }
}
