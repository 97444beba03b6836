use regulations_api::types::{ListResponse, Response};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_documents_list() {
    let json = load_fixture("documents.json");
    let resp: ListResponse = serde_json::from_str(&json).unwrap();

    assert_eq!(resp.data.len(), 2);
    let doc = &resp.data[0];
    assert_eq!(doc.id.as_deref(), Some("FDA-2009-N-0501-0012"));
    assert_eq!(doc.resource_type, "documents");
    assert_eq!(doc.attributes["agencyId"], "FDA");
    assert_eq!(doc.attributes["documentType"], "Notice");
    assert_eq!(resp.data[1].attributes["openForComment"], true);

    let meta = resp.meta.unwrap();
    assert_eq!(meta["totalElements"], 2);
    assert_eq!(meta["pageNumber"], 1);
    assert!(resp.included.is_none());
}

#[test]
fn deserialize_document_detail_with_attachments() {
    let json = load_fixture("document_detail.json");
    let resp: Response = serde_json::from_str(&json).unwrap();

    assert_eq!(resp.data.id.as_deref(), Some("FDA-2009-N-0501-0012"));
    assert!(resp.data.relationships.is_some());

    let included = resp.included.unwrap();
    assert_eq!(included.len(), 1);
    assert_eq!(included[0].resource_type, "attachments");
    assert_eq!(
        included[0].attributes["fileFormats"][0]["format"],
        "pdf"
    );
}

#[test]
fn deserialize_comments_list() {
    let json = load_fixture("comments.json");
    let resp: ListResponse = serde_json::from_str(&json).unwrap();

    assert_eq!(resp.data.len(), 1);
    assert_eq!(resp.data[0].resource_type, "comments");
    assert_eq!(resp.data[0].attributes["title"], "Comment from Anonymous");
}

#[test]
fn deserialize_dockets_list() {
    let json = load_fixture("dockets.json");
    let resp: ListResponse = serde_json::from_str(&json).unwrap();

    assert_eq!(resp.data.len(), 1);
    assert_eq!(resp.data[0].id.as_deref(), Some("EPA-HQ-OAR-2003-0129"));
    assert_eq!(resp.data[0].attributes["docketType"], "Rulemaking");
}

#[test]
fn deserialize_agency_categories() {
    let json = load_fixture("agency_categories.json");
    let resp: ListResponse = serde_json::from_str(&json).unwrap();

    assert_eq!(resp.data.len(), 3);
    assert!(resp
        .data
        .iter()
        .all(|c| c.resource_type == "agency-categories"));
    assert_eq!(resp.data[2].attributes["default"], true);
    assert!(resp.meta.is_none());
}

#[test]
fn envelope_round_trips_to_json() {
    // Callers render results as JSON strings; nothing may be lost on the
    // way through the typed envelope.
    let json = load_fixture("documents.json");
    let resp: ListResponse = serde_json::from_str(&json).unwrap();
    let reserialized = serde_json::to_value(&resp).unwrap();
    let original: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(reserialized, original);
}
