use super::*;

/// Tests updating a review's rating.
///
/// Expected: Ok(Some(Review)) with the new rating and unchanged text
#[tokio::test]
async fn updates_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, review) = factory::helpers::create_review_with_dependencies(db).await?;

    let updated = ReviewRepository::new(db)
        .update(
            review.id,
            UpdateReviewParams {
                rating: Some(2.0),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.rating, 2.0);
    assert_eq!(updated.review, review.review);

    Ok(())
}

/// Tests updating a non-existent review.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_nonexistent_review() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ReviewRepository::new(db)
        .update(999, UpdateReviewParams::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}
