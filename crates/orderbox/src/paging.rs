//! Search paging.

use orderbox_core::{encode, CodecError, CodecResult, ParameterSet, Record};

/// One page of a search request.
///
/// Rendered as `no-of-records` and `page-no`.
///
/// # Example
///
/// ```
/// use orderbox::Page;
///
/// let page = Page::new(2, 50).unwrap();
/// let mut params = orderbox::ParameterSet::new();
/// page.append_to(&mut params);
///
/// assert_eq!(params.get("no-of-records"), Some("50"));
/// assert_eq!(params.get("page-no"), Some("2"));
/// assert!(Page::new(1, 5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page_no: u32,
    records: u16,
}

impl Page {
    /// Fewest records the API returns per page.
    pub const MIN_RECORDS: u16 = 10;
    /// Most records the API returns per page.
    pub const MAX_RECORDS: u16 = 500;

    /// Creates a page. `page_no` is 1-based.
    pub fn new(page_no: u32, records: u16) -> CodecResult<Self> {
        if page_no == 0 {
            return Err(CodecError::InvalidPage(
                "page number starts at 1".to_string(),
            ));
        }
        if !(Self::MIN_RECORDS..=Self::MAX_RECORDS).contains(&records) {
            return Err(CodecError::InvalidPage(format!(
                "records per page must be between {} and {}, got {records}",
                Self::MIN_RECORDS,
                Self::MAX_RECORDS
            )));
        }
        Ok(Self { page_no, records })
    }

    /// The first page with `records` entries.
    pub fn first(records: u16) -> CodecResult<Self> {
        Self::new(1, records)
    }

    /// The 1-based page number.
    #[must_use]
    pub fn page_no(&self) -> u32 {
        self.page_no
    }

    /// Records requested per page.
    #[must_use]
    pub fn records(&self) -> u16 {
        self.records
    }

    /// Adds `no-of-records` and `page-no` to `params`.
    pub fn append_to(&self, params: &mut ParameterSet) {
        params.add("no-of-records", self.records.to_string());
        params.add("page-no", self.page_no.to_string());
    }

    /// Encodes `criteria` and appends this page.
    pub fn encode_with<R: Record>(&self, criteria: &R) -> CodecResult<ParameterSet> {
        let mut params = encode(criteria)?;
        self.append_to(&mut params);
        Ok(params)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page_no: 1,
            records: Self::MIN_RECORDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Page::new(1, 10).is_ok());
        assert!(Page::new(1, 500).is_ok());
        assert!(Page::new(1, 9).is_err());
        assert!(Page::new(1, 501).is_err());

        let err = Page::new(0, 10).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PAGE");
        assert!(err.is_validation());
    }

    #[test]
    fn test_default_is_first_page() {
        let page = Page::default();
        assert_eq!(page.page_no(), 1);
        assert_eq!(page.records(), 10);
        assert_eq!(Page::first(10).unwrap(), page);
    }
}
