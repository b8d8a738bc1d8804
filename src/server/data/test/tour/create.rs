use super::*;

/// Tests creating a tour with all child rows.
///
/// Verifies that start dates, locations and guides are stored and returned with
/// the created tour, in their display order.
///
/// Expected: Ok(Tour) with relations populated
#[tokio::test]
async fn creates_tour_with_relations() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let guide = create_user_with_role(db, "lead-guide").await?;
    let repo = TourRepository::new(db);

    let later = Utc.with_ymd_and_hms(2021, 7, 20, 9, 0, 0).unwrap();
    let earlier = Utc.with_ymd_and_hms(2021, 6, 19, 9, 0, 0).unwrap();

    let tour = repo
        .create(CreateTourParams {
            start_dates: vec![later, earlier],
            start_location: Some(GeoPoint {
                lat: 25.781842,
                lng: -80.128473,
                address: Some("301 Biscayne Blvd, Miami, FL 33132, USA".to_string()),
                description: Some("Miami, USA".to_string()),
            }),
            locations: vec![
                Location {
                    point: GeoPoint {
                        lat: 25.790654,
                        lng: -80.128473,
                        address: None,
                        description: Some("Lummus Park Beach".to_string()),
                    },
                    day: 1,
                },
                Location {
                    point: GeoPoint {
                        lat: 24.909047,
                        lng: -80.647885,
                        address: None,
                        description: Some("Islamorada".to_string()),
                    },
                    day: 2,
                },
            ],
            guides: vec![guide.id],
            ..create_params("The Sea Explorer")
        })
        .await?;

    assert_eq!(tour.name, "The Sea Explorer");
    assert_eq!(tour.difficulty, Difficulty::Medium);
    assert_eq!(tour.ratings_quantity, 0);
    assert_eq!(tour.images.len(), 2);
    assert_eq!(tour.start_dates, vec![earlier, later]);
    assert_eq!(tour.start_location.as_ref().unwrap().lat, 25.781842);
    assert_eq!(tour.locations.len(), 2);
    assert_eq!(tour.locations[0].day, 1);
    assert_eq!(tour.locations[1].point.description.as_deref(), Some("Islamorada"));
    assert_eq!(tour.guides.len(), 1);
    assert_eq!(tour.guides[0].id, guide.id);

    Ok(())
}

/// Tests that tour names are unique.
///
/// Expected: Err(DbErr) on the second insert with the same name
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TourRepository::new(db);
    repo.create(create_params("The Forest Hiker")).await?;

    let result = repo.create(create_params("The Forest Hiker")).await;

    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    ));

    Ok(())
}
