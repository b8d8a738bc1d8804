use super::*;

/// Tests finding an existing tour.
///
/// Expected: Ok(Some(Tour)) with guides loaded
#[tokio::test]
async fn finds_existing_tour() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tour = factory::create_tour(db).await?;
    let guide = create_user_with_role(db, "guide").await?;
    factory::add_guide(db, tour.id, guide.id).await?;

    let found = TourRepository::new(db).find_by_id(tour.id).await?;

    let found = found.unwrap();
    assert_eq!(found.id, tour.id);
    assert_eq!(found.guides.len(), 1);
    assert_eq!(found.guides[0].email, guide.email);

    Ok(())
}

/// Tests that deactivated guides are not populated.
///
/// Expected: Ok(Some(Tour)) with no guides
#[tokio::test]
async fn skips_inactive_guides() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tour = factory::create_tour(db).await?;
    let guide = UserFactory::new(db).role("guide").active(false).build().await?;
    factory::add_guide(db, tour.id, guide.id).await?;

    let found = TourRepository::new(db).find_by_id(tour.id).await?.unwrap();

    assert!(found.guides.is_empty());

    Ok(())
}

/// Tests querying for a non-existent tour.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_nonexistent_tour() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = TourRepository::new(db).find_by_id(999).await?;

    assert!(result.is_none());

    Ok(())
}
