mod common;

use common::{file, Call, FakeApi, STORE};
use serde_json::json;
use vsadmin::vstore::AttributeSet;
use vsadmin::{AdminError, FileDetails, NoticeKind, Session};

fn attrs(value: serde_json::Value) -> AttributeSet {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn update_mirrors_confirmed_attributes() {
    let api = FakeApi::with_files(vec![file("file-1", "a.pdf", json!({"old": true}))]);
    let mut session = Session::new(api, STORE);
    session.refresh().await.unwrap();

    session
        .update_attributes("file-1", attrs(json!({"title": "New"})))
        .await
        .unwrap();

    assert_eq!(
        session.index().get("file-1").unwrap().attributes,
        attrs(json!({"title": "New"}))
    );
    assert_eq!(session.notices()[0].kind, NoticeKind::Success);
}

#[tokio::test]
async fn update_over_limits_never_reaches_service() {
    let api = FakeApi::with_files(vec![file("file-1", "a.pdf", json!({}))]);
    let mut session = Session::new(api, STORE);
    session.refresh().await.unwrap();

    let too_many: AttributeSet = (0..17).map(|i| (format!("k{i}"), json!(i))).collect();
    let err = session.update_attributes("file-1", too_many).await.unwrap_err();
    assert!(matches!(err, AdminError::AttributeLimit(_)));

    let mut long_key = AttributeSet::new();
    long_key.insert("x".repeat(257), json!("v"));
    let err = session.update_attributes("file-1", long_key).await.unwrap_err();
    assert!(matches!(err, AdminError::AttributeLimit(_)));

    assert!(session.api().update_calls().is_empty());
    assert!(session
        .notices()
        .iter()
        .all(|n| n.kind == NoticeKind::Error));
}

#[tokio::test]
async fn failed_update_leaves_mirror_untouched() {
    let api = FakeApi::with_files(vec![file("file-1", "a.pdf", json!({"keep": 1}))])
        .rejecting("file-1");
    let mut session = Session::new(api, STORE);
    session.refresh().await.unwrap();

    let err = session
        .update_attributes("file-1", attrs(json!({"title": "X"})))
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::RemoteFailure(_)));
    assert_eq!(
        session.index().get("file-1").unwrap().attributes,
        attrs(json!({"keep": 1}))
    );
}

#[tokio::test]
async fn delete_removes_record_only_on_success() {
    let api = FakeApi::with_files(vec![
        file("file-1", "a.pdf", json!({})),
        file("file-2", "b.pdf", json!({})),
    ])
    .rejecting("file-2");
    let mut session = Session::new(api, STORE);
    session.refresh().await.unwrap();

    session.delete_file("file-1").await.unwrap();
    assert!(session.index().get("file-1").is_none());
    assert_eq!(session.notices()[0].message, "Deleted a.pdf");

    assert!(session.delete_file("file-2").await.is_err());
    assert!(session.index().get("file-2").is_some());
}

#[tokio::test]
async fn selecting_another_store_resets_the_mirror() {
    let api = FakeApi::with_files(vec![file("file-1", "a.pdf", json!({}))]);
    let mut session = Session::new(api, STORE);
    session.refresh().await.unwrap();
    assert_eq!(session.files().len(), 1);

    session.select_vector_store(STORE);
    assert_eq!(session.files().len(), 1);

    session.select_vector_store("vs_other");
    assert!(session.files().is_empty());
    assert_eq!(session.vector_store_id(), "vs_other");

    session.refresh().await.unwrap();
    assert!(session.files().is_empty());
    assert_eq!(session.api().calls().last(), Some(&Call::ListFiles("vs_other".into())));
}

#[tokio::test]
async fn upload_adds_record_to_mirror() {
    let mut session = Session::new(FakeApi::default(), STORE);
    let record = session
        .upload_file("new.pdf", "application/pdf", b"%PDF".to_vec(), Some(attrs(json!({"title": "N"}))))
        .await
        .unwrap();

    assert_eq!(record.bytes, 4);
    assert_eq!(session.index().get(&record.id).unwrap().filename, "new.pdf");
}

#[tokio::test]
async fn retrieve_maps_404_to_not_found() {
    let session = Session::new(FakeApi::default(), STORE);
    let err = session.retrieve("file-missing").await.unwrap_err();
    assert!(matches!(err, AdminError::NotFound { ref file_id } if file_id == "file-missing"));
}

#[tokio::test]
async fn describe_uses_mirror_before_fetching() {
    let api = FakeApi::with_files(vec![file("file-1", "a.pdf", json!({"title": "A"}))]);
    let mut session = Session::new(api, STORE);
    session.refresh().await.unwrap();

    let details = session.describe("file-1").await.unwrap();
    assert!(matches!(details, FileDetails::Mirrored(r) if r.filename == "a.pdf"));
    assert!(!session
        .api()
        .calls()
        .iter()
        .any(|c| matches!(c, Call::Retrieve(_))));

    let err = session.describe("file-missing").await.unwrap_err();
    assert!(matches!(err, AdminError::NotFound { .. }));
    assert_eq!(
        session.api().calls().last(),
        Some(&Call::Retrieve("file-missing".into()))
    );
}
