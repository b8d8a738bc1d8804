use super::*;

/// Tests creating an account.
///
/// Expected: Ok(User) with the `user` role and default photo
#[tokio::test]
async fn creates_user_with_defaults() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = UserRepository::new(db)
        .create(create_params("jonas@example.com"))
        .await?;

    assert_eq!(user.email, "jonas@example.com");
    assert_eq!(user.role, Role::User);
    assert_eq!(user.photo, "default.jpg");
    assert!(user.password_changed_at.is_none());

    Ok(())
}

/// Tests that emails are unique.
///
/// Expected: Err(DbErr) with a unique constraint violation
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(create_params("jonas@example.com")).await?;

    let err = repo
        .create(create_params("jonas@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
