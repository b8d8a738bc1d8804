use super::*;

/// Tests finding an active user.
///
/// Expected: Ok(Some(User))
#[tokio::test]
async fn finds_active_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserFactory::new(db).role("lead-guide").build().await?;

    let found = UserRepository::new(db).find_by_id(user.id).await?.unwrap();

    assert_eq!(found.id, user.id);
    assert_eq!(found.role, Role::LeadGuide);

    Ok(())
}

/// Tests that deactivated users are invisible.
///
/// Expected: Ok(None) for both ID and email lookups
#[tokio::test]
async fn hides_inactive_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserFactory::new(db).active(false).build().await?;
    let repo = UserRepository::new(db);

    assert!(repo.find_by_id(user.id).await?.is_none());
    assert!(repo.find_credentials_by_email(&user.email).await?.is_none());

    Ok(())
}

/// Tests that the password hash is returned with credentials.
///
/// Expected: Ok(Some(UserCredentials)) whose hash verifies the factory password
#[tokio::test]
async fn returns_credentials_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserFactory::new(db).password("pass1234").build().await?;

    let credentials = UserRepository::new(db)
        .find_credentials_by_email(&user.email)
        .await?
        .unwrap();

    assert_eq!(credentials.user.id, user.id);
    assert!(bcrypt::verify("pass1234", &credentials.password_hash).unwrap());

    Ok(())
}
