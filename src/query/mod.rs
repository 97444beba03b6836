mod common;
pub use self::common::{
    Query, QueryCommon, SortDirection, MAX_PAGE, MAX_PAGE_SIZE, MIN_PAGE, MIN_PAGE_SIZE,
};
mod document;
pub use self::document::{DocumentQuery, DocumentSortBy, DocumentType};

mod comment;
pub use self::comment::{CommentQuery, CommentSortBy};

mod docket;
pub use self::docket::{DocketQuery, DocketSortBy, DocketType};
