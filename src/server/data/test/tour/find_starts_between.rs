use super::*;

/// Tests that only start dates inside the range are returned.
///
/// Expected: the 2021 start date joined with its tour name
#[tokio::test]
async fn returns_starts_in_range() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let tour = TourFactory::new(db).name("The Northern Lights").build().await?;
    let in_range = Utc.with_ymd_and_hms(2021, 12, 16, 10, 0, 0).unwrap();
    factory::add_start_date(db, tour.id, in_range).await?;
    factory::add_start_date(db, tour.id, Utc.with_ymd_and_hms(2022, 1, 5, 10, 0, 0).unwrap())
        .await?;

    let starts = TourRepository::new(db)
        .find_starts_between(
            Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
        )
        .await?;

    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].start_date, in_range);
    assert_eq!(starts[0].tour_name, "The Northern Lights");

    Ok(())
}
