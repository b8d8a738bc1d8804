use super::*;

/// Tests listing reviews filtered by tour and rating.
///
/// Expected: only the matching review, author populated
#[tokio::test]
async fn filters_by_tour_and_rating() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first_tour = factory::create_tour(db).await?;
    let second_tour = factory::create_tour(db).await?;
    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;

    let expected = ReviewFactory::new(db, first_tour.id, alice.id)
        .rating(5.0)
        .build()
        .await?;
    ReviewFactory::new(db, first_tour.id, bob.id)
        .rating(2.0)
        .build()
        .await?;
    ReviewFactory::new(db, second_tour.id, alice.id)
        .rating(5.0)
        .build()
        .await?;

    let features =
        ApiFeatures::from_query(vec![("rating[gte]".to_string(), "4".to_string())]).unwrap();
    let select = features
        .apply(
            entity::prelude::Review::find().filter(entity::review::Column::TourId.eq(first_tour.id)),
        )
        .unwrap();

    let reviews = ReviewRepository::new(db).find_many(select).await?;

    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].id, expected.id);
    assert_eq!(reviews[0].author.id, alice.id);

    Ok(())
}

/// Tests reading all reviews of a tour.
///
/// Expected: reviews of that tour only, oldest first
#[tokio::test]
async fn finds_reviews_by_tour() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tour = factory::create_tour(db).await?;
    let other = factory::create_tour(db).await?;
    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;

    let first = factory::create_review(db, tour.id, alice.id).await?;
    let second = factory::create_review(db, tour.id, bob.id).await?;
    factory::create_review(db, other.id, alice.id).await?;

    let reviews = ReviewRepository::new(db).find_by_tour(tour.id).await?;

    let ids: Vec<i32> = reviews.iter().map(|review| review.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    Ok(())
}
