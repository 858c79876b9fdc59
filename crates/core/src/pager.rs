//! Fixed-size pagination over an already ordered collection.

/// Number of items returned per page at every pagination call site.
pub const PAGE_SIZE: usize = 10;

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: Self = Self(1);

    /// Build a page number from untrusted input; anything below 1 becomes 1.
    #[must_use]
    pub fn new(raw: i64) -> Self {
        if raw < 1 {
            return Self::FIRST;
        }
        Self(u32::try_from(raw).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Index of the first item on this page.
    #[must_use]
    pub fn offset(self) -> usize {
        let index = usize::try_from(self.0 - 1).unwrap_or(usize::MAX);
        index.saturating_mul(PAGE_SIZE)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// One page of a collection together with the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform the items while keeping `total`.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Slice `collection` to the requested page.
///
/// `total` is the length of `collection` before slicing. A page past the end
/// yields no items rather than an error.
#[must_use]
pub fn paginate<T>(page: PageNumber, collection: Vec<T>) -> Page<T> {
    let total = collection.len();
    let items = collection
        .into_iter()
        .skip(page.offset())
        .take(PAGE_SIZE)
        .collect();
    Page { items, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: u32) -> Vec<u32> {
        (1..=n).collect()
    }

    #[test]
    fn non_positive_page_numbers_clamp_to_first() {
        assert_eq!(PageNumber::new(0), PageNumber::FIRST);
        assert_eq!(PageNumber::new(-7), PageNumber::FIRST);
        assert_eq!(PageNumber::new(3).value(), 3);
    }

    #[test]
    fn huge_page_number_saturates() {
        let page = PageNumber::new(i64::MAX);
        assert_eq!(page.value(), u32::MAX);
        let result = paginate(page, numbers(5));
        assert!(result.is_empty());
        assert_eq!(result.total, 5);
    }

    #[test]
    fn first_page_takes_leading_items() {
        let page = paginate(PageNumber::FIRST, numbers(25));
        assert_eq!(page.items, numbers(10));
        assert_eq!(page.total, 25);
    }

    #[test]
    fn last_partial_page_is_contiguous() {
        let page = paginate(PageNumber::new(3), numbers(25));
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total, 25);
    }

    #[test]
    fn page_past_end_is_empty_not_error() {
        let page = paginate(PageNumber::new(2), numbers(10));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 10);
    }

    #[test]
    fn empty_collection_yields_empty_first_page() {
        let page = paginate::<u32>(PageNumber::FIRST, Vec::new());
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn every_page_respects_size_and_offset() {
        let all = numbers(47);
        for p in 1..=6_i64 {
            let page = paginate(PageNumber::new(p), all.clone());
            assert_eq!(page.total, all.len());
            assert!(page.items.len() <= PAGE_SIZE);
            let start = usize::try_from(p - 1).unwrap() * PAGE_SIZE;
            let expected: Vec<u32> = all.iter().copied().skip(start).take(PAGE_SIZE).collect();
            assert_eq!(page.items, expected);
        }
    }

    #[test]
    fn map_keeps_total() {
        let page = paginate(PageNumber::FIRST, numbers(12)).map(|n| n * 2);
        assert_eq!(page.total, 12);
        assert_eq!(page.items[0], 2);
    }
}
