use super::*;

/// Tests creating a review.
///
/// Expected: Ok(Review) with the author populated
#[tokio::test]
async fn creates_review_with_author() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let tour = factory::create_tour(db).await?;

    let review = ReviewRepository::new(db)
        .create(CreateReviewParams {
            tour_id: tour.id,
            user_id: user.id,
            review: "Cras mollis nisi parturient mi nec aliquet".to_string(),
            rating: 5.0,
        })
        .await?;

    assert_eq!(review.tour_id, tour.id);
    assert_eq!(review.rating, 5.0);
    assert_eq!(review.author.id, user.id);
    assert_eq!(review.author.name, user.name);

    Ok(())
}

/// Tests that a user can review a tour only once.
///
/// Expected: Err(DbErr) with a unique constraint violation
#[tokio::test]
async fn rejects_second_review_of_same_tour() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, tour, _) = factory::helpers::create_review_with_dependencies(db).await?;
    let repo = ReviewRepository::new(db);

    assert!(repo.exists_for(tour.id, user.id).await?);

    let err = repo
        .create(CreateReviewParams {
            tour_id: tour.id,
            user_id: user.id,
            review: "Again".to_string(),
            rating: 3.0,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
