use super::*;

async fn seed(db: &sea_orm::DatabaseConnection) -> Result<(), DbErr> {
    TourFactory::new(db)
        .name("The Forest Hiker")
        .difficulty("easy")
        .duration(5)
        .price(397.0)
        .ratings_average(4.7)
        .build()
        .await?;
    TourFactory::new(db)
        .name("The Sea Explorer")
        .difficulty("medium")
        .duration(7)
        .price(497.0)
        .ratings_average(4.8)
        .build()
        .await?;
    TourFactory::new(db)
        .name("The Snow Adventurer")
        .difficulty("difficult")
        .duration(4)
        .price(997.0)
        .ratings_average(4.5)
        .build()
        .await?;
    TourFactory::new(db)
        .name("The City Wanderer")
        .difficulty("easy")
        .duration(9)
        .price(1197.0)
        .ratings_average(4.6)
        .build()
        .await?;

    Ok(())
}

fn names(tours: &[crate::server::model::tour::Tour]) -> Vec<&str> {
    tours.iter().map(|tour| tour.name.as_str()).collect()
}

/// Tests equality and comparison filters.
///
/// Expected: only easy tours of at least 6 days
#[tokio::test]
async fn filters_by_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    seed(db).await?;

    let features =
        ApiFeatures::from_query(query(&[("difficulty", "easy"), ("duration[gte]", "6")])).unwrap();
    let select = features.apply(entity::prelude::Tour::find()).unwrap();

    let tours = TourRepository::new(db).find_many(select).await?;

    assert_eq!(names(&tours), vec!["The City Wanderer"]);

    Ok(())
}

/// Tests multi-key sorting.
///
/// Expected: tours ordered by difficulty name, then by price descending
#[tokio::test]
async fn sorts_by_multiple_keys() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    seed(db).await?;

    let features = ApiFeatures::from_query(query(&[("sort", "difficulty,-price")])).unwrap();
    let select = features.apply(entity::prelude::Tour::find()).unwrap();

    let tours = TourRepository::new(db).find_many(select).await?;

    assert_eq!(
        names(&tours),
        vec![
            "The Snow Adventurer",
            "The City Wanderer",
            "The Forest Hiker",
            "The Sea Explorer"
        ]
    );

    Ok(())
}

/// Tests pagination over a price-sorted list.
///
/// Expected: the second page of two holds the two most expensive tours
#[tokio::test]
async fn paginates_results() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_tour_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    seed(db).await?;

    let features =
        ApiFeatures::from_query(query(&[("sort", "price"), ("page", "2"), ("limit", "2")]))
            .unwrap();
    let select = features.apply(entity::prelude::Tour::find()).unwrap();

    let tours = TourRepository::new(db).find_many(select).await?;

    assert_eq!(names(&tours), vec!["The Snow Adventurer", "The City Wanderer"]);

    Ok(())
}

/// Tests that unknown fields and unparsable values are rejected before querying.
///
/// Expected: Err(AppError::InvalidValue)
#[tokio::test]
async fn rejects_invalid_filters() -> Result<(), DbErr> {
    let unknown = ApiFeatures::from_query(query(&[("secretTour", "true")])).unwrap();
    assert!(unknown.apply(entity::prelude::Tour::find()).is_err());

    let not_a_number = ApiFeatures::from_query(query(&[("price[lt]", "cheap")])).unwrap();
    let err = not_a_number
        .apply(entity::prelude::Tour::find())
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid price: cheap.");

    let bad_sort = ApiFeatures::from_query(query(&[("sort", "password")])).unwrap();
    assert!(bad_sort.apply(entity::prelude::Tour::find()).is_err());

    Ok(())
}
