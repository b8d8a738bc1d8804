use super::*;

/// Tests finding a user by an unexpired reset token.
///
/// Expected: Ok(Some(User))
#[tokio::test]
async fn finds_user_by_valid_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    repo.set_reset_token(
        user.id,
        Some(("abc123".to_string(), Utc::now() + Duration::minutes(10))),
    )
    .await?;

    let found = repo.find_by_reset_token("abc123", Utc::now()).await?;

    assert_eq!(found.unwrap().id, user.id);

    Ok(())
}

/// Tests that expired tokens do not match.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_expired_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    repo.set_reset_token(
        user.id,
        Some(("abc123".to_string(), Utc::now() - Duration::minutes(1))),
    )
    .await?;

    assert!(repo.find_by_reset_token("abc123", Utc::now()).await?.is_none());

    Ok(())
}

/// Tests clearing a reset token.
///
/// Expected: both token columns are null afterwards
#[tokio::test]
async fn clears_token() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    repo.set_reset_token(
        user.id,
        Some(("abc123".to_string(), Utc::now() + Duration::minutes(10))),
    )
    .await?;
    repo.set_reset_token(user.id, None).await?;

    let stored = entity::prelude::User::find_by_id(user.id)
        .one(db)
        .await?
        .unwrap();
    assert!(stored.password_reset_token.is_none());
    assert!(stored.password_reset_expires.is_none());

    Ok(())
}
