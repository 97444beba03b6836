use std::fmt;

use super::common::{push_filter, push_sort, Query, QueryCommon};

/// Query builder for the `/dockets` endpoint.
#[derive(Default)]
pub struct DocketQuery {
    pub common: QueryCommon,
    pub agency_id: Option<String>,
    pub search_term: Option<String>,
    pub last_modified_date: Option<String>,
    pub docket_type: Option<DocketType>,
    pub sort_by: Option<DocketSortBy>,
}

impl Query for DocketQuery {
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
        push_filter(
            &mut pairs,
            "lastModifiedDate",
            self.last_modified_date.as_ref(),
        );
        if let Some(docket_type) = self.docket_type {
            pairs.push(("filter[docketType]".to_string(), docket_type.to_string()));
        }
        push_sort(&mut pairs, self.sort_by, self.common.sort_direction);
        self.common.append_pairs(&mut pairs);
        pairs
    }
}

impl DocketQuery {
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

    /// Filters by last-modified timestamp (`yyyy-MM-dd HH:mm:ss`, `ge`/`le` allowed).
    pub fn with_last_modified_date(mut self, last_modified_date: &str) -> Self {
        self.last_modified_date = Some(last_modified_date.to_string());
        self
    }

    /// Filters by docket type.
    pub fn with_docket_type(mut self, docket_type: DocketType) -> Self {
        self.docket_type = Some(docket_type);
        self
    }

    /// Sorts by the given field.
    pub fn with_sort_by(mut self, sort_by: DocketSortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
}

/// Docket types recognized by the registry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DocketType {
    Rulemaking,
    Nonrulemaking,
}

impl fmt::Display for DocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocketType::Rulemaking => "Rulemaking",
            DocketType::Nonrulemaking => "Nonrulemaking",
        })
    }
}

/// Sortable fields on `/dockets`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DocketSortBy {
    Title,
    DocketId,
    LastModifiedDate,
}

impl fmt::Display for DocketSortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocketSortBy::Title => "title",
            DocketSortBy::DocketId => "docketId",
            DocketSortBy::LastModifiedDate => "lastModifiedDate",
        })
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{DocketQuery, DocketSortBy, DocketType};
    use crate::query::{Query, SortDirection};

    fn base_url() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn default_query_is_empty() {
        assert!(DocketQuery::default().query_pairs().is_empty());
    }

    #[test]
    fn filters_and_sort() {
        insta::assert_snapshot!(
            DocketQuery::default()
                .with_agency_id("FDA")
                .with_docket_type(DocketType::Rulemaking)
                .with_sort_by(DocketSortBy::Title)
                .with_sort_direction(SortDirection::Desc)
                .add_to_url(&base_url())
                .to_string(),
            @"https://example.com/?filter%5BagencyId%5D=FDA&filter%5BdocketType%5D=Rulemaking&sort=-title"
        );
    }
}
