//! End-to-end service flows over in-memory tables and a fake platform.

mod common;

use common::{Harness, OTP_CODE};
use domain::{
    AccessDenial, ActivityDraft, ActivityStatus, ProfileAction, ProfileStatus, Role, TimelineDraft,
};
use khawarizmi_site::errors::AppError;
use khawarizmi_site::services::{ImageUpload, Registration, ServiceContainer};
use tokio_test::{assert_err, assert_ok};

fn registration(email: &str) -> Registration {
    Registration {
        full_name: "Aisyah Rahma".to_string(),
        email: email.to_string(),
        password: "secret".to_string(),
        confirm_password: "secret".to_string(),
        reason: "testing".to_string(),
    }
}

fn activity_draft() -> ActivityDraft {
    ActivityDraft {
        title: "Kajian Rutin".to_string(),
        description: "Weekly study circle for all members".to_string(),
        status: ActivityStatus::Active,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_registration_is_pending() {
    let h = Harness::new();

    let profile = assert_ok!(h.services.auth().register(registration("a@x.com")).await);

    assert_eq!(profile.status, ProfileStatus::PendingVerification);
    assert_eq!(profile.role, Role::Admin);
    assert!(!profile.is_approved);
    assert_eq!(h.store.profiles.get(profile.id).unwrap().email, "a@x.com");
}

#[tokio::test]
async fn test_duplicate_registration_is_refused() {
    let h = Harness::new();
    h.services.auth().register(registration("a@x.com")).await.unwrap();

    let err = h
        .services
        .auth()
        .register(registration("a@x.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::EmailAlreadyRegistered));
    assert!(err.user_message().contains("already registered"));
}

#[tokio::test]
async fn test_pending_admin_is_denied_and_signed_out() {
    let h = Harness::new();
    let profile = h.services.auth().register(registration("a@x.com")).await.unwrap();
    let token = h.identity.open_session(profile.id);

    let err = h.services.gate().authorize(&token).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::AccessDenied(AccessDenial::AwaitingApproval)
    ));
    assert!(err.user_message().contains("awaiting approval"));
    assert_eq!(err.redirect(), Some("/admin/auth/login"));
    assert!(!h.identity.has_session(&token));
}

#[tokio::test]
async fn test_approved_admin_can_log_in() {
    let h = Harness::new();
    let (head, _) = h.seed_super_admin();
    let pending = h.services.auth().register(registration("a@x.com")).await.unwrap();

    let approved = h
        .services
        .admins()
        .apply(head, pending.id, ProfileAction::Approve)
        .await
        .unwrap();
    assert_eq!(approved.status, ProfileStatus::Active);
    assert!(approved.is_approved);
    assert_eq!(approved.approved_by, Some(head));

    let login = h
        .services
        .auth()
        .login("a@x.com".to_string(), "secret".to_string())
        .await
        .unwrap();
    assert_eq!(login.profile.id, pending.id);

    let admin = h
        .services
        .gate()
        .authorize(&login.session.access_token)
        .await
        .unwrap();
    assert_eq!(admin.id(), pending.id);
}

#[tokio::test]
async fn test_login_before_approval_ends_session() {
    let h = Harness::new();
    h.services.auth().register(registration("a@x.com")).await.unwrap();

    let err = h
        .services
        .auth()
        .login("a@x.com".to_string(), "secret".to_string())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::AccessDenied(AccessDenial::AwaitingApproval)
    ));
}

#[tokio::test]
async fn test_wrong_password_is_invalid_credentials() {
    let h = Harness::new();
    h.seed_super_admin();

    let err = assert_err!(
        h.services
            .auth()
            .login("head@kkmi.test".to_string(), "wrong".to_string())
            .await
    );

    assert!(matches!(err, AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_otp_login_for_active_admin() {
    let h = Harness::new();
    h.seed_super_admin();

    let session = h
        .services
        .auth()
        .verify_otp("head@kkmi.test".to_string(), OTP_CODE.to_string())
        .await
        .unwrap();

    assert!(h.services.gate().authorize(&session.access_token).await.is_ok());
}

#[tokio::test]
async fn test_suspended_admin_loses_access() {
    let h = Harness::new();
    let (head, _) = h.seed_super_admin();
    let (other, token) = h.seed_profile("b@x.com", Role::Admin, ProfileStatus::Active, true);

    h.services
        .admins()
        .apply(head, other, ProfileAction::Suspend)
        .await
        .unwrap();

    let err = h.services.gate().authorize(&token).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::AccessDenied(AccessDenial::NotActive(ProfileStatus::Suspended))
    ));
}

#[tokio::test]
async fn test_oversized_thumbnail_never_uploads() {
    let h = Harness::new();
    let (_, token) = h.seed_super_admin();
    let admin = h.services.gate().authorize(&token).await.unwrap();

    let image = ImageUpload::new(
        "poster.png".to_string(),
        "image/png".to_string(),
        vec![0u8; 3 * 1024 * 1024],
    );
    let err = h
        .services
        .activities()
        .create(&admin, activity_draft(), Some(image))
        .await
        .unwrap_err();

    assert_eq!(err.field(), Some("image_file"));
    assert!(err.user_message().contains("too large"));
    assert_eq!(h.storage.upload_count(), 0);
    assert_eq!(h.store.activities.len(), 0);
}

#[tokio::test]
async fn test_activity_created_with_public_thumbnail() {
    let h = Harness::new();
    let (_, token) = h.seed_super_admin();
    let admin = h.services.gate().authorize(&token).await.unwrap();

    let image = ImageUpload::new(
        "poster.png".to_string(),
        "image/png".to_string(),
        vec![1u8; 1024],
    );
    let activity = h
        .services
        .activities()
        .create(&admin, activity_draft(), Some(image))
        .await
        .unwrap();

    assert_eq!(h.storage.upload_count(), 1);
    assert!(activity
        .image_url
        .as_deref()
        .unwrap()
        .starts_with("https://platform.test/storage/v1/object/public/activity-images/"));

    let public = h.services.activities().list_public().await.unwrap();
    assert_eq!(public.len(), 1);
}

#[tokio::test]
async fn test_timeline_lists_newest_date_first() {
    let h = Harness::new();
    let timeline = h.services.timeline();

    for (title, date) in [("Founding", "2023-01-01"), ("First retreat", "2023-06-01")] {
        timeline
            .create(TimelineDraft {
                title: title.to_string(),
                date: date.to_string(),
                description: "Earlier milestone".to_string(),
                tags: None,
            })
            .await
            .unwrap();
    }

    let items = timeline
        .create(TimelineDraft {
            title: "Launch".to_string(),
            date: "2024-01-01".to_string(),
            description: "Kickoff event".to_string(),
            tags: None,
        })
        .await
        .unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].title, "Launch");
    assert!(items[0].tags.is_none());
    assert!(items.windows(2).all(|w| w[0].date >= w[1].date));
}
