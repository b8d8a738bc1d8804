use super::*;

/// Tests deleting a user with reviews and guide links.
///
/// Expected: Ok(true) and no rows referencing the user
#[tokio::test]
async fn deletes_user_and_references() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, tour, _) = factory::helpers::create_review_with_dependencies(db).await?;
    factory::add_guide(db, tour.id, user.id).await?;

    let deleted = UserRepository::new(db).delete(user.id).await?;

    assert!(deleted);
    assert!(entity::prelude::User::find_by_id(user.id).one(db).await?.is_none());
    assert!(entity::prelude::Review::find().all(db).await?.is_empty());
    assert!(entity::prelude::TourGuide::find().all(db).await?.is_empty());

    Ok(())
}

/// Tests deleting a non-existent user.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_nonexistent_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(!UserRepository::new(db).delete(999).await?);

    Ok(())
}
