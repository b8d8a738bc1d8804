use super::*;

/// Tests deleting a review.
///
/// Expected: Ok(Some(tour_id)) and the row is gone
#[tokio::test]
async fn deletes_review_and_returns_tour() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, tour, review) = factory::helpers::create_review_with_dependencies(db).await?;

    let result = ReviewRepository::new(db).delete(review.id).await?;

    assert_eq!(result, Some(tour.id));
    assert!(entity::prelude::Review::find_by_id(review.id)
        .one(db)
        .await?
        .is_none());

    Ok(())
}

/// Tests deleting a non-existent review.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_nonexistent_review() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(ReviewRepository::new(db).delete(999).await?.is_none());

    Ok(())
}
