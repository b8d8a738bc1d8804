use super::*;

/// Tests deleting a tour with reviews and child rows.
///
/// Expected: Ok(true) and no remaining rows referencing the tour
#[tokio::test]
async fn deletes_tour_and_children() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, tour, _) = factory::helpers::create_review_with_dependencies(db).await?;
    factory::add_guide(db, tour.id, user.id).await?;
    factory::add_start_date(db, tour.id, Utc::now()).await?;

    let deleted = TourRepository::new(db).delete(tour.id).await?;

    assert!(deleted);
    assert!(entity::prelude::Tour::find_by_id(tour.id).one(db).await?.is_none());
    assert!(entity::prelude::Review::find().all(db).await?.is_empty());
    assert!(entity::prelude::TourGuide::find().all(db).await?.is_empty());
    assert!(entity::prelude::TourStartDate::find().all(db).await?.is_empty());
    // The guide account itself is untouched.
    assert!(entity::prelude::User::find_by_id(user.id).one(db).await?.is_some());

    Ok(())
}

/// Tests deleting a non-existent tour.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_nonexistent_tour() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = TourRepository::new(db).delete(999).await?;

    assert!(!deleted);

    Ok(())
}
