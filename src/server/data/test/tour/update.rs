use super::*;

/// Tests a partial update.
///
/// Verifies that only the provided fields change and list fields are replaced.
///
/// Expected: Ok(Some(Tour)) with the new price and start dates
#[tokio::test]
async fn updates_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tour = TourFactory::new(db).name("The Park Camper").build().await?;
    factory::add_start_date(db, tour.id, Utc.with_ymd_and_hms(2021, 8, 5, 9, 0, 0).unwrap())
        .await?;

    let new_date = Utc.with_ymd_and_hms(2022, 3, 11, 9, 0, 0).unwrap();
    let updated = TourRepository::new(db)
        .update(
            tour.id,
            UpdateTourParams {
                price: Some(1497.0),
                start_dates: Some(vec![new_date]),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.price, 1497.0);
    assert_eq!(updated.name, "The Park Camper");
    assert_eq!(updated.start_dates, vec![new_date]);

    Ok(())
}

/// Tests an update without fields.
///
/// Expected: Ok(Some(Tour)) unchanged
#[tokio::test]
async fn empty_update_returns_tour() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tour = factory::create_tour(db).await?;

    let updated = TourRepository::new(db)
        .update(tour.id, UpdateTourParams::default())
        .await?
        .unwrap();

    assert_eq!(updated.name, tour.name);
    assert_eq!(updated.price, tour.price);

    Ok(())
}

/// Tests updating a non-existent tour.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_nonexistent_tour() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = TourRepository::new(db)
        .update(
            999,
            UpdateTourParams {
                price: Some(1.0),
                ..Default::default()
            },
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}
