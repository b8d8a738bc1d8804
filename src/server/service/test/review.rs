use super::*;

/// Tests that creating reviews updates the tour's rating aggregate.
///
/// Expected: quantity 2 and average 4.5 after ratings of 4 and 5
#[tokio::test]
async fn create_recomputes_tour_ratings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tour = TourFactory::new(db).ratings_quantity(0).build().await?;
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    let service = ReviewService::new(db);

    for (user_id, rating) in [(first.id, 4.0), (second.id, 5.0)] {
        service
            .create(CreateReviewParams {
                tour_id: tour.id,
                user_id,
                review: "Great trip".to_string(),
                rating,
            })
            .await?;
    }

    assert_eq!(stored_ratings(db, tour.id).await?, (2, 4.5));

    Ok(())
}

/// Tests that updating a rating updates the aggregate.
///
/// Expected: average follows the new rating
#[tokio::test]
async fn update_recomputes_tour_ratings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, tour, review) = factory::helpers::create_review_with_dependencies(db).await?;
    let service = ReviewService::new(db);
    service.calc_average_ratings(tour.id).await?;

    service
        .update(
            review.id,
            UpdateReviewParams {
                rating: Some(2.0),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(stored_ratings(db, tour.id).await?, (1, 2.0));

    Ok(())
}

/// Tests that deleting the last review resets the aggregate.
///
/// Expected: quantity 0 and average 0.0
#[tokio::test]
async fn delete_last_review_resets_ratings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, tour, review) = factory::helpers::create_review_with_dependencies(db).await?;
    let service = ReviewService::new(db);
    service.calc_average_ratings(tour.id).await?;

    service.delete(review.id).await?;

    assert_eq!(stored_ratings(db, tour.id).await?, (0, 0.0));

    Ok(())
}

/// Tests reviewing the same tour twice.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_second_review_of_same_tour() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, tour, _) = factory::helpers::create_review_with_dependencies(db).await?;

    let result = ReviewService::new(db)
        .create(CreateReviewParams {
            tour_id: tour.id,
            user_id: user.id,
            review: "Again".to_string(),
            rating: 3.0,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests reviewing a tour that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn rejects_review_of_missing_tour() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let result = ReviewService::new(db)
        .create(CreateReviewParams {
            tour_id: 9999,
            user_id: user.id,
            review: "Where is it".to_string(),
            rating: 3.0,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests listing reviews nested under one tour.
///
/// Expected: only the reviews of that tour
#[tokio::test]
async fn get_all_restricts_to_tour() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let tour = factory::create_tour(db).await?;
    let other = factory::create_tour(db).await?;
    ReviewFactory::new(db, tour.id, user.id).build().await?;
    ReviewFactory::new(db, other.id, user.id).build().await?;

    let reviews = ReviewService::new(db)
        .get_all(&ApiFeatures::default(), Some(tour.id))
        .await?;

    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].tour_id, tour.id);

    Ok(())
}
