use super::*;

/// Tests listing users with a role filter.
///
/// Verifies that inactive accounts never appear, even when they match the filter.
///
/// Expected: only the active guide
#[tokio::test]
async fn filters_active_users_by_role() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let guide = UserFactory::new(db).role("guide").build().await?;
    UserFactory::new(db).role("guide").active(false).build().await?;
    factory::create_user(db).await?;

    let features = ApiFeatures::from_query(vec![("role".to_string(), "guide".to_string())]).unwrap();
    let select = features.apply(entity::prelude::User::find()).unwrap();

    let users = UserRepository::new(db).find_many(select).await?;

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, guide.id);

    Ok(())
}

/// Tests that an unknown role value is rejected.
///
/// Expected: Err(AppError::InvalidValue)
#[tokio::test]
async fn rejects_unknown_role() -> Result<(), DbErr> {
    let features =
        ApiFeatures::from_query(vec![("role".to_string(), "superuser".to_string())]).unwrap();

    let err = features.apply(entity::prelude::User::find()).unwrap_err();

    assert_eq!(err.to_string(), "Invalid role: superuser.");

    Ok(())
}
