use std::fmt;

use chrono::NaiveDate;

use super::common::{push_filter, push_sort, Query, QueryCommon};

/// Query builder for the `/comments` endpoint.
#[derive(Default)]
pub struct CommentQuery {
    pub common: QueryCommon,
    pub agency_id: Option<String>,
    pub search_term: Option<String>,
    pub posted_date: Option<String>,
    pub last_modified_date: Option<String>,
    pub comment_on_id: Option<String>,
    pub sort_by: Option<CommentSortBy>,
}

impl Query for CommentQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push_filter(&mut pairs, "agencyId", self.agency_id.as_ref());
        push_filter(&mut pairs, "searchTerm", self.search_term.as_ref());
        push_filter(&mut pairs, "postedDate", self.posted_date.as_ref());
        push_filter(
            &mut pairs,
            "lastModifiedDate",
            self.last_modified_date.as_ref(),
        );
        push_filter(&mut pairs, "commentOnId", self.comment_on_id.as_ref());
        push_sort(&mut pairs, self.sort_by, self.common.sort_direction);
        self.common.append_pairs(&mut pairs);
        pairs
    }
}

impl CommentQuery {
    /// Filters by agency acronym (e.g. "EPA").
    pub fn with_agency_id(mut self, agency_id: &str) -> Self {
        self.agency_id = Some(agency_id.to_string());
        self
    }

    /// Full-text search term.
    pub fn with_search_term(mut self, search_term: &str) -> Self {
        self.search_term = Some(search_term.to_string());
        self
    }

    /// Filters by posted date (`yyyy-MM-dd`, `ge`/`le` allowed).
    pub fn with_posted_date(mut self, posted_date: &str) -> Self {
        self.posted_date = Some(posted_date.to_string());
        self
    }

    /// Filters by posted date, exact day.
    pub fn with_posted_date_on(self, date: NaiveDate) -> Self {
        self.with_posted_date(&date.format("%Y-%m-%d").to_string())
    }

    /// Filters by last-modified timestamp (`yyyy-MM-dd HH:mm:ss`, `ge`/`le` allowed).
    pub fn with_last_modified_date(mut self, last_modified_date: &str) -> Self {
        self.last_modified_date = Some(last_modified_date.to_string());
        self
    }

    /// Filters to comments on the given object ID of a document.
    pub fn with_comment_on_id(mut self, comment_on_id: &str) -> Self {
        self.comment_on_id = Some(comment_on_id.to_string());
        self
    }

    /// Sorts by the given field.
    pub fn with_sort_by(mut self, sort_by: CommentSortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
}

/// Sortable fields on `/comments`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CommentSortBy {
    PostedDate,
    LastModifiedDate,
    DocumentId,
}

impl fmt::Display for CommentSortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CommentSortBy::PostedDate => "postedDate",
            CommentSortBy::LastModifiedDate => "lastModifiedDate",
            CommentSortBy::DocumentId => "documentId",
        })
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{CommentQuery, CommentSortBy};
    use crate::query::{Query, SortDirection};

    fn base_url() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn default_query_is_empty() {
        assert!(CommentQuery::default().query_pairs().is_empty());
    }

    #[test]
    fn filters_and_sort() {
        insta::assert_snapshot!(
            CommentQuery::default()
                .with_agency_id("EPA")
                .with_comment_on_id("0900006480b7e7f1")
                .with_sort_by(CommentSortBy::PostedDate)
                .with_sort_direction(SortDirection::Desc)
                .add_to_url(&base_url())
                .to_string(),
            @"https://example.com/?filter%5BagencyId%5D=EPA&filter%5BcommentOnId%5D=0900006480b7e7f1&sort=-postedDate"
        );
    }

    #[test]
    fn date_convenience_formats_exact_day() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let pairs = CommentQuery::default().with_posted_date_on(date).query_pairs();
        assert_eq!(
            pairs,
            vec![("filter[postedDate]".to_string(), "2025-03-09".to_string())]
        );
    }
}
