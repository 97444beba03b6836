use std::fmt;

use chrono::NaiveDate;

use super::common::{push_filter, push_sort, Query, QueryCommon};

/// Query builder for the `/documents` endpoint.
///
/// Date filters are passed through verbatim; the API accepts `yyyy-MM-dd`
/// values and `ge`/`le` range syntax, which is the caller's responsibility
/// to compose. The `with_*_on` helpers format an exact date.
#[derive(Default)]
pub struct DocumentQuery {
    pub common: QueryCommon,
    pub agency_id: Option<String>,
    pub comment_end_date: Option<String>,
    pub docket_id: Option<String>,
    pub document_type: Option<DocumentType>,
    pub fr_doc_num: Option<String>,
    pub search_term: Option<String>,
    pub posted_date: Option<String>,
    pub last_modified_date: Option<String>,
    pub subtype: Option<String>,
    pub within_comment_period: bool,
    pub sort_by: Option<DocumentSortBy>,
}

impl Query for DocumentQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn common(&self) -> &QueryCommon {
        &self.common
    }
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        push_filter(&mut pairs, "agencyId", self.agency_id.as_ref());
        push_filter(&mut pairs, "commentEndDate", self.comment_end_date.as_ref());
        push_filter(&mut pairs, "docketId", self.docket_id.as_ref());
        if let Some(document_type) = self.document_type {
            pairs.push((
                "filter[documentType]".to_string(),
                document_type.to_string(),
            ));
        }
        push_filter(&mut pairs, "frDocNum", self.fr_doc_num.as_ref());
        push_filter(&mut pairs, "searchTerm", self.search_term.as_ref());
        push_filter(&mut pairs, "postedDate", self.posted_date.as_ref());
        push_filter(
            &mut pairs,
            "lastModifiedDate",
            self.last_modified_date.as_ref(),
        );
        push_filter(&mut pairs, "subtype", self.subtype.as_ref());
        // The API only understands an affirmative value here; false means
        // "don't filter", so the key is omitted entirely.
        if self.within_comment_period {
            pairs.push((
                "filter[withinCommentPeriod]".to_string(),
                "true".to_string(),
            ));
        }
        push_sort(&mut pairs, self.sort_by, self.common.sort_direction);
        self.common.append_pairs(&mut pairs);
        pairs
    }
}

impl DocumentQuery {
    /// Filters by agency acronym (e.g. "EPA").
    pub fn with_agency_id(mut self, agency_id: &str) -> Self {
        self.agency_id = Some(agency_id.to_string());
        self
    }

    /// Filters by comment-period end date (`yyyy-MM-dd`, `ge`/`le` allowed).
    pub fn with_comment_end_date(mut self, comment_end_date: &str) -> Self {
        self.comment_end_date = Some(comment_end_date.to_string());
        self
    }

    /// Filters by comment-period end date, exact day.
    pub fn with_comment_end_date_on(self, date: NaiveDate) -> Self {
        self.with_comment_end_date(&date.format("%Y-%m-%d").to_string())
    }

    /// Filters by docket ID (e.g. "EPA-HQ-OAR-2003-0129").
    pub fn with_docket_id(mut self, docket_id: &str) -> Self {
        self.docket_id = Some(docket_id.to_string());
        self
    }

    /// Filters by document type.
    pub fn with_document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = Some(document_type);
        self
    }

    /// Filters by Federal Register document number.
    pub fn with_fr_doc_num(mut self, fr_doc_num: &str) -> Self {
        self.fr_doc_num = Some(fr_doc_num.to_string());
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

    /// Filters by document subtype.
    pub fn with_subtype(mut self, subtype: &str) -> Self {
        self.subtype = Some(subtype.to_string());
        self
    }

    /// Restricts results to documents currently open for comment.
    pub fn within_comment_period(mut self) -> Self {
        self.within_comment_period = true;
        self
    }

    /// Sorts by the given field.
    pub fn with_sort_by(mut self, sort_by: DocumentSortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
}

/// Document types recognized by the registry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DocumentType {
    Notice,
    Rule,
    ProposedRule,
    SupportingMaterial,
    Other,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentType::Notice => "Notice",
            DocumentType::Rule => "Rule",
            DocumentType::ProposedRule => "Proposed Rule",
            DocumentType::SupportingMaterial => "Supporting & Related Material",
            DocumentType::Other => "Other",
        })
    }
}

/// Sortable fields on `/documents`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DocumentSortBy {
    PostedDate,
    CommentEndDate,
    LastModifiedDate,
    DocumentId,
    Title,
}

impl fmt::Display for DocumentSortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentSortBy::PostedDate => "postedDate",
            DocumentSortBy::CommentEndDate => "commentEndDate",
            DocumentSortBy::LastModifiedDate => "lastModifiedDate",
            DocumentSortBy::DocumentId => "documentId",
            DocumentSortBy::Title => "title",
        })
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{DocumentQuery, DocumentSortBy, DocumentType};
    use crate::query::{Query, SortDirection};

    fn base_url() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn default_query_is_empty() {
        assert!(DocumentQuery::default().query_pairs().is_empty());
        insta::assert_snapshot!(
            DocumentQuery::default().add_to_url(&base_url()).to_string(),
            @"https://example.com/"
        );
    }

    #[test]
    fn search_and_paging() {
        insta::assert_snapshot!(
            DocumentQuery::default()
                .with_search_term("water")
                .with_page(2)
                .with_page_size(5)
                .add_to_url(&base_url())
                .to_string(),
            @"https://example.com/?filter%5BsearchTerm%5D=water&page%5Bnumber%5D=2&page%5Bsize%5D=5"
        );
    }

    #[test]
    fn document_type_spells_out_wire_names() {
        insta::assert_snapshot!(
            DocumentQuery::default()
                .with_document_type(DocumentType::ProposedRule)
                .add_to_url(&base_url())
                .to_string(),
            @"https://example.com/?filter%5BdocumentType%5D=Proposed+Rule"
        );
        insta::assert_snapshot!(
            DocumentQuery::default()
                .with_document_type(DocumentType::SupportingMaterial)
                .add_to_url(&base_url())
                .to_string(),
            @"https://example.com/?filter%5BdocumentType%5D=Supporting+%26+Related+Material"
        );
    }

    #[test]
    fn sort_direction_prefix() {
        insta::assert_snapshot!(
            DocumentQuery::default()
                .with_sort_by(DocumentSortBy::PostedDate)
                .add_to_url(&base_url())
                .to_string(),
            @"https://example.com/?sort=postedDate"
        );
        insta::assert_snapshot!(
            DocumentQuery::default()
                .with_sort_by(DocumentSortBy::PostedDate)
                .with_sort_direction(SortDirection::Desc)
                .add_to_url(&base_url())
                .to_string(),
            @"https://example.com/?sort=-postedDate"
        );
    }

    #[test]
    fn within_comment_period_is_asymmetric() {
        assert!(DocumentQuery::default().query_pairs().is_empty());
        let pairs = DocumentQuery::default().within_comment_period().query_pairs();
        assert_eq!(
            pairs,
            vec![(
                "filter[withinCommentPeriod]".to_string(),
                "true".to_string()
            )]
        );
    }
}
