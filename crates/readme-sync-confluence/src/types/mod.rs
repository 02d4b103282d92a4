//! Confluence API types.

mod page;

pub(crate) use page::PageResponse;
pub use page::{Page, PageUpdate};
