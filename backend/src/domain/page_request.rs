//! Page descriptor assembly for vehicle listings.

use pagination::{PageDescriptor, PageRequest, PageRequestError};
use serde_json::json;

use super::error::{Error, ErrorCode};
use super::sort::SortDescriptor;

/// Offset, limit and validated sort order for one listing call.
pub type VehiclePageDescriptor = PageDescriptor<SortDescriptor>;

impl From<PageRequestError> for Error {
    fn from(value: PageRequestError) -> Self {
        let message = value.to_string();
        match value {
            PageRequestError::NegativePageNumber { value } => {
                Error::new(ErrorCode::InvalidPageNumber, message)
                    .with_details(json!({ "parameter": "pageNumber", "value": value }))
            }
            PageRequestError::NonPositivePageSize { value } => {
                Error::new(ErrorCode::InvalidPageSize, message)
                    .with_details(json!({ "parameter": "pageSize", "value": value }))
            }
            PageRequestError::OffsetOverflow { number, size } => {
                Error::new(ErrorCode::InvalidPageNumber, message).with_details(json!({
                    "parameter": "pageNumber",
                    "value": number,
                    "pageSize": size,
                }))
            }
        }
    }
}

/// Validate raw page parameters and pair them with a sort order.
///
/// # Examples
/// ```
/// use vehicle_catalogue::domain::build_page_descriptor;
/// use vehicle_catalogue::domain::sort::SortDescriptor;
///
/// let descriptor = build_page_descriptor(2, 5, SortDescriptor::default()).expect("valid page");
/// assert_eq!(descriptor.offset(), 10);
/// assert_eq!(descriptor.limit(), 5);
/// ```
pub fn build_page_descriptor(
    page_number: i64,
    page_size: i64,
    sort: SortDescriptor,
) -> Result<VehiclePageDescriptor, Error> {
    let request = PageRequest::try_new(page_number, page_size)?;
    Ok(PageDescriptor::new(request, sort))
}
