use super::*;

/// Tests updating profile fields and role.
///
/// Expected: Ok(Some(User)) with the new values
#[tokio::test]
async fn updates_profile_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let updated = UserRepository::new(db)
        .update(
            user.id,
            UpdateUserParams {
                name: Some("Kate Morrison".to_string()),
                role: Some(Role::Guide),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Kate Morrison");
    assert_eq!(updated.role, Role::Guide);
    assert_eq!(updated.email, user.email);

    Ok(())
}

/// Tests changing the email to one already taken.
///
/// Expected: Err(DbErr) with a unique constraint violation
#[tokio::test]
async fn rejects_taken_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;

    let err = UserRepository::new(db)
        .update(
            second.id,
            UpdateUserParams {
                email: Some(first.email),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}

/// Tests deactivating an account.
///
/// Expected: the account can no longer be found
#[tokio::test]
async fn deactivates_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    repo.deactivate(user.id).await?;

    assert!(repo.find_by_id(user.id).await?.is_none());
    let stored = entity::prelude::User::find_by_id(user.id)
        .one(db)
        .await?
        .unwrap();
    assert!(!stored.active);

    Ok(())
}
