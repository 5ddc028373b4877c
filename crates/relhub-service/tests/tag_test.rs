//! Integration tests for revision tagging.

mod helpers;

use tokio_util::sync::CancellationToken;

use relhub_core::error::ErrorKind;
use relhub_entity::release::ReleasePhase;
use relhub_entity::revision::TagError;
use relhub_service::RequestContext;

use helpers::{RELEASE, TestApp};

#[tokio::test]
async fn test_tag_shows_in_history() {
    let app = TestApp::new(ReleasePhase::ReleaseCandidateDraft).await;
    app.add_revision("00001", ReleasePhase::ReleaseCandidateDraft).await;
    app.add_revision("00002", ReleasePhase::ReleaseCandidateDraft).await;
    let ctx = RequestContext::new("alice");

    let revision = app
        .tags
        .set_tag(&ctx, RELEASE, "00001", "v1.0-RC1")
        .await
        .unwrap();
    assert_eq!(revision.tag.as_deref(), Some("v1.0-RC1"));

    let history = app
        .history
        .history(RELEASE, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(history.entries[1].revision.tag.as_deref(), Some("v1.0-RC1"));
    assert_eq!(history.entries[1].revision.display_label(), "00001 (v1.0-RC1)");
}

#[tokio::test]
async fn test_rejected_tags_leave_revision_untouched() {
    let app = TestApp::new(ReleasePhase::ReleaseCandidateDraft).await;
    app.add_revision("00001", ReleasePhase::ReleaseCandidateDraft).await;
    let ctx = RequestContext::new("alice");
    app.tags.set_tag(&ctx, RELEASE, "00001", "rc1").await.unwrap();

    for bad in ["bad tag", "v1/rc", "ünïcode"] {
        let err = app.tags.set_tag(&ctx, RELEASE, "00001", bad).await.unwrap_err();
        assert!(err.is(ErrorKind::Validation), "{bad} should be rejected");
    }
    let err = app
        .tags
        .set_tag(&ctx, RELEASE, "00001", &"x".repeat(300))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));

    let revision = app.store_revision("00001").await;
    assert_eq!(revision.tag.as_deref(), Some("rc1"));
}

#[tokio::test]
async fn test_tag_at_length_limit_is_accepted() {
    let app = TestApp::new(ReleasePhase::ReleaseCandidateDraft).await;
    app.add_revision("00001", ReleasePhase::ReleaseCandidateDraft).await;
    let ctx = RequestContext::new("alice");

    let tag = "x".repeat(256);
    let revision = app.tags.set_tag(&ctx, RELEASE, "00001", &tag).await.unwrap();
    assert_eq!(revision.tag, Some(tag));
}

#[tokio::test]
async fn test_empty_tag_clears() {
    let app = TestApp::new(ReleasePhase::ReleaseCandidateDraft).await;
    app.add_revision("00001", ReleasePhase::ReleaseCandidateDraft).await;
    let ctx = RequestContext::new("alice");

    app.tags.set_tag(&ctx, RELEASE, "00001", "rc1").await.unwrap();
    let revision = app.tags.set_tag(&ctx, RELEASE, "00001", "").await.unwrap();
    assert_eq!(revision.tag, None);
}

#[tokio::test]
async fn test_unknown_revision_is_not_found() {
    let app = TestApp::new(ReleasePhase::ReleaseCandidateDraft).await;
    let ctx = RequestContext::new("alice");

    let err = app
        .tags
        .set_tag(&ctx, RELEASE, "00007", "rc1")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    let err = app
        .tags
        .set_tag(&ctx, "other-9.9", "00001", "rc1")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

fn tag_error(err: &relhub_core::error::AppError) -> Option<&TagError> {
    err.source
        .as_deref()
        .and_then(|source| source.downcast_ref::<TagError>())
}

#[tokio::test]
async fn test_tag_errors_keep_their_variant() {
    let app = TestApp::new(ReleasePhase::ReleaseCandidateDraft).await;
    app.add_revision("00001", ReleasePhase::ReleaseCandidateDraft).await;
    let ctx = RequestContext::new("alice");

    let err = app
        .tags
        .set_tag(&ctx, RELEASE, "00001", "bad tag")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
    assert_eq!(tag_error(&err), Some(&TagError::Format { invalid: ' ' }));

    let err = app
        .tags
        .set_tag(&ctx, RELEASE, "00001", &"a".repeat(300))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
    assert!(matches!(
        tag_error(&err),
        Some(TagError::Length { bytes: 300, .. })
    ));
}

#[tokio::test]
async fn test_policy_checked_tagging() {
    let app = TestApp::new(ReleasePhase::ReleasePreview).await;
    app.add_revision("00001", ReleasePhase::ReleaseCandidateDraft).await;
    app.add_revision("00002", ReleasePhase::ReleasePreview).await;
    app.add_revision("00003", ReleasePhase::ReleasePreview).await;
    let ctx = RequestContext::new("alice");

    let revision = app
        .tags
        .set_tag_if_modifiable(&ctx, RELEASE, "00002", "rc2")
        .await
        .unwrap();
    assert_eq!(revision.tag.as_deref(), Some("rc2"));

    for number in ["00001", "00003"] {
        let err = app
            .tags
            .set_tag_if_modifiable(&ctx, RELEASE, number, "rc")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict), "{number} should be refused");
        assert_eq!(app.store_revision(number).await.tag, None);
    }
}
