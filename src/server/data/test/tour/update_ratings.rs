use super::*;

/// Tests persisting a rating aggregate.
///
/// Expected: stored quantity and average match the summary
#[tokio::test]
async fn stores_rating_summary() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tour = factory::create_tour(db).await?;

    TourRepository::new(db)
        .update_ratings(
            tour.id,
            RatingSummary {
                quantity: 3,
                average: 4.3,
            },
        )
        .await?;

    let stored = entity::prelude::Tour::find_by_id(tour.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.ratings_quantity, 3);
    assert_eq!(stored.ratings_average, 4.3);

    Ok(())
}
