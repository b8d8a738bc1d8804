use super::*;

/// Tests collecting the ratings of one tour.
///
/// Expected: ratings of that tour only
#[tokio::test]
async fn collects_tour_ratings() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tour = factory::create_tour(db).await?;
    let other = factory::create_tour(db).await?;
    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;

    ReviewFactory::new(db, tour.id, alice.id).rating(5.0).build().await?;
    ReviewFactory::new(db, tour.id, bob.id).rating(3.0).build().await?;
    ReviewFactory::new(db, other.id, alice.id).rating(1.0).build().await?;

    let repo = ReviewRepository::new(db);
    let mut ratings = repo.ratings_for_tour(tour.id).await?;
    ratings.sort_by(f64::total_cmp);

    assert_eq!(ratings, vec![3.0, 5.0]);
    assert_eq!(repo.tour_ids_for_user(alice.id).await?.len(), 2);

    Ok(())
}
