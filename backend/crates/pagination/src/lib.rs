//! Offset pagination primitives shared by catalogue endpoints.
//!
//! - [`PageRequest`] validates a zero-based page index and a page size taken
//!   straight from untrusted input.
//! - [`PageDescriptor`] pairs the derived offset and limit with a
//!   caller-chosen sort order so storage adapters receive one immutable value.
//! - [`Page`] is the response envelope: one slice of items plus the total
//!   number of matches across every page.
//!
//! ```
//! use pagination::{Page, PageDescriptor, PageRequest};
//!
//! let request = PageRequest::try_new(2, 10).expect("valid page request");
//! let descriptor = PageDescriptor::new(request, "id");
//! assert_eq!(descriptor.offset(), 20);
//! assert_eq!(descriptor.limit(), 10);
//!
//! let page = Page::new(vec!["a", "b"], 22, request);
//! assert_eq!(page.total_pages(), 3);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Zero-based page index used when the caller supplies none.
pub const DEFAULT_PAGE_NUMBER: i64 = 0;

/// Page size used when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Validation failures raised by [`PageRequest::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The page index was negative.
    #[error("pageNumber must be greater than or equal to 0, got {value}")]
    NegativePageNumber {
        /// Rejected page index.
        value: i64,
    },
    /// The page size was zero or negative.
    #[error("pageSize must be greater than or equal to 1, got {value}")]
    NonPositivePageSize {
        /// Rejected page size.
        value: i64,
    },
    /// The derived offset does not fit into a signed 64-bit integer.
    #[error("pageNumber {number} with pageSize {size} exceeds the addressable range")]
    OffsetOverflow {
        /// Requested page index.
        number: u64,
        /// Requested page size.
        size: u64,
    },
}

/// Validated zero-based page index and page size.
///
/// ## Invariants
/// - `size >= 1`.
/// - `number * size` fits into an `i64`, the widest offset SQL accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    number: u64,
    size: u64,
}

impl PageRequest {
    /// Validate raw page parameters.
    ///
    /// Signed inputs are accepted so that negative values supplied by a
    /// client reach this check instead of failing inside a parser.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when the index is negative, the size is
    /// below one, or the offset overflows.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, PageRequestError};
    ///
    /// assert!(PageRequest::try_new(0, 10).is_ok());
    /// assert_eq!(
    ///     PageRequest::try_new(-1, 10),
    ///     Err(PageRequestError::NegativePageNumber { value: -1 })
    /// );
    /// ```
    pub fn try_new(number: i64, size: i64) -> Result<Self, PageRequestError> {
        let page_number = u64::try_from(number)
            .map_err(|_| PageRequestError::NegativePageNumber { value: number })?;
        let page_size = u64::try_from(size)
            .ok()
            .filter(|candidate| *candidate >= 1)
            .ok_or(PageRequestError::NonPositivePageSize { value: size })?;
        let offset = page_number
            .checked_mul(page_size)
            .and_then(|offset| i64::try_from(offset).ok());
        if offset.is_none() {
            return Err(PageRequestError::OffsetOverflow {
                number: page_number,
                size: page_size,
            });
        }
        Ok(Self {
            number: page_number,
            size: page_size,
        })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Number of items per page.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Number of items skipped before this page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.number.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 0,
            size: 10,
        }
    }
}

/// Immutable slice description handed to storage adapters.
///
/// `S` is the sort order chosen by the caller; this crate only carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor<S> {
    request: PageRequest,
    sort: S,
}

impl<S> PageDescriptor<S> {
    /// Combine a validated page request with a sort order.
    #[must_use]
    pub const fn new(request: PageRequest, sort: S) -> Self {
        Self { request, sort }
    }

    /// Underlying page request.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Number of items to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.request.offset()
    }

    /// Maximum number of items to return.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.request.size()
    }

    /// Sort order applied before slicing.
    #[must_use]
    pub const fn sort(&self) -> &S {
        &self.sort
    }
}

/// One page of results plus the metadata needed to navigate the rest.
///
/// Serialises as `{content, totalElements, totalPages, number, size}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    content: Vec<T>,
    total_elements: u64,
    total_pages: u64,
    number: u64,
    size: u64,
}

impl<T> Page<T> {
    /// Build a page from the already sliced `content` and the total number of
    /// matches across every page.
    #[must_use]
    pub fn new(content: Vec<T>, total_elements: u64, request: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            total_pages: total_elements.div_ceil(request.size()),
            number: request.number(),
            size: request.size(),
        }
    }

    /// Items on this page, in order.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Total matches across every page.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Number of pages needed to list every match.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Zero-based index of this page.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Whether a further page exists after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages
    }

    /// Convert every item while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
        }
    }
}
