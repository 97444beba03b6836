//! Shared query infrastructure: the [`Query`] trait, [`QueryCommon`] fields, and [`SortDirection`].

use url::Url;

use crate::errors::Error;

/// Smallest accepted `page[number]` value.
pub const MIN_PAGE: i64 = 1;
/// Largest `page[number]` the API will serve.
pub const MAX_PAGE: i64 = 20;
/// Smallest accepted `page[size]` value.
pub const MIN_PAGE_SIZE: i64 = 5;
/// Largest accepted `page[size]` value.
pub const MAX_PAGE_SIZE: i64 = 250;

/// Trait implemented by all query builders.
///
/// A query encodes to a set of `(key, value)` pairs containing exactly the
/// parameters that were supplied -- an empty builder encodes to an empty
/// set. Shared builder methods cover pagination and sort direction.
pub trait Query {
    /// Encodes this query as query-parameter pairs. Only supplied fields
    /// produce a pair.
    fn query_pairs(&self) -> Vec<(String, String)>;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Returns a shared reference to the common query fields.
    fn common(&self) -> &QueryCommon;

    /// Appends this query's parameters to the given URL, returning the
    /// modified URL. The URL's query component is left untouched when the
    /// query encodes to no parameters.
    fn add_to_url(&self, url: &Url) -> Url {
        let pairs = self.query_pairs();
        let mut url = url.clone();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    /// Checks the query against client-side constraints.
    ///
    /// The API rejects out-of-range paging server-side; the client refuses
    /// to forward such a request in the first place.
    fn validate(&self) -> Result<(), Error> {
        self.common().validate()
    }

    /// Sets the page number (1-indexed, at most [`MAX_PAGE`]).
    fn with_page(mut self, page: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = Some(page);
        self
    }

    /// Sets the number of results per page ([`MIN_PAGE_SIZE`]..=[`MAX_PAGE_SIZE`]).
    fn with_page_size(mut self, page_size: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_size = Some(page_size);
        self
    }

    /// Sets the sort direction (ascending or descending).
    fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self
    where
        Self: Sized,
    {
        self.get_common().sort_direction = sort_direction;
        self
    }
}

/// Sort order for API results.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub enum SortDirection {
    /// Ascending order. This is the default: the sort field is sent as-is.
    #[default]
    Asc,
    /// Descending order. The sort field is sent with a `-` prefix.
    Desc,
}

impl SortDirection {
    /// The prefix this direction contributes to the `sort` value.
    pub(crate) fn prefix(&self) -> &'static str {
        match self {
            SortDirection::Asc => "",
            SortDirection::Desc => "-",
        }
    }
}

/// Fields shared by all query types: pagination and sort direction.
///
/// Absent fields emit no query parameter at all.
#[derive(Clone, Copy, Default)]
pub struct QueryCommon {
    /// Page number (1-indexed). `None` uses the API default.
    pub page: Option<i64>,
    /// Results per page. `None` uses the API default.
    pub page_size: Option<i64>,
    /// Sort direction. Only takes effect when a sort field is chosen.
    pub sort_direction: SortDirection,
}

impl QueryCommon {
    /// Appends the `page[number]` and `page[size]` pairs for supplied fields.
    pub fn append_pairs(&self, pairs: &mut Vec<(String, String)>) {
        if let Some(page) = self.page {
            pairs.push(("page[number]".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page[size]".to_string(), page_size.to_string()));
        }
    }

    /// Rejects out-of-range paging before any request is made.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(page) = self.page {
            if !(MIN_PAGE..=MAX_PAGE).contains(&page) {
                return Err(Error::InvalidQuery(format!(
                    "page[number] must be between {} and {}, got {}",
                    MIN_PAGE, MAX_PAGE, page
                )));
            }
        }
        if let Some(page_size) = self.page_size {
            if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
                return Err(Error::InvalidQuery(format!(
                    "page[size] must be between {} and {}, got {}",
                    MIN_PAGE_SIZE, MAX_PAGE_SIZE, page_size
                )));
            }
        }
        Ok(())
    }
}

/// Renders the `sort` pair for a chosen sort field, honoring direction.
pub(crate) fn push_sort(
    pairs: &mut Vec<(String, String)>,
    sort_by: Option<impl std::fmt::Display>,
    direction: SortDirection,
) {
    if let Some(sort_by) = sort_by {
        pairs.push((
            "sort".to_string(),
            format!("{}{}", direction.prefix(), sort_by),
        ));
    }
}

/// Pushes a `filter[<field>]` pair when a value was supplied.
pub(crate) fn push_filter(pairs: &mut Vec<(String, String)>, field: &str, value: Option<&String>) {
    if let Some(value) = value {
        pairs.push((format!("filter[{}]", field), value.clone()));
    }
}
