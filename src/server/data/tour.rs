//! Tour data repository for database operations.
//!
//! A tour is stored across four tables: the `tour` row itself plus its start dates,
//! itinerary locations and guide links. `TourRepository` reads and writes the whole
//! aggregate, batching child lookups so list queries issue a fixed number of statements.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::{
    model::{
        review::RatingSummary,
        tour::{
            CreateTourParams, Difficulty, GeoPoint, Location, Tour, TourStart, UpdateTourParams,
        },
    },
    util::api_features::{FieldKind, Queryable},
};

impl Queryable for entity::tour::Entity {
    fn query_field(name: &str) -> Option<(Self::Column, FieldKind)> {
        use entity::tour::Column;

        let field = match name {
            "id" => (Column::Id, FieldKind::Integer),
            "name" => (Column::Name, FieldKind::Text),
            "duration" => (Column::Duration, FieldKind::Integer),
            "maxGroupSize" => (Column::MaxGroupSize, FieldKind::Integer),
            "difficulty" => (Column::Difficulty, FieldKind::Enum(Difficulty::VALUES)),
            "ratingsAverage" => (Column::RatingsAverage, FieldKind::Float),
            "ratingsQuantity" => (Column::RatingsQuantity, FieldKind::Integer),
            "price" => (Column::Price, FieldKind::Float),
            "priceDiscount" => (Column::PriceDiscount, FieldKind::Float),
            "createdAt" => (Column::CreatedAt, FieldKind::Timestamp),
            _ => return None,
        };

        Some(field)
    }

    fn id_column() -> Self::Column {
        entity::tour::Column::Id
    }
}

/// Repository providing database operations for tours and their child rows.
pub struct TourRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TourRepository<'a> {
    /// Creates a new TourRepository instance.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a tour with its start dates, locations and guide links.
    ///
    /// # Arguments
    /// - `params` - Validated tour fields; guide IDs must reference existing users
    ///
    /// # Returns
    /// - `Ok(Tour)` - The created tour with relations loaded
    /// - `Err(DbErr)` - Database error, including a unique violation on `name`
    pub async fn create(&self, params: CreateTourParams) -> Result<Tour, DbErr> {
        let (start_lat, start_lng, start_address, start_description) =
            split_point(params.start_location);

        let entity = entity::tour::ActiveModel {
            name: ActiveValue::Set(params.name),
            duration: ActiveValue::Set(params.duration),
            max_group_size: ActiveValue::Set(params.max_group_size),
            difficulty: ActiveValue::Set(params.difficulty.as_str().to_string()),
            ratings_average: ActiveValue::Set(params.ratings_average),
            ratings_quantity: ActiveValue::Set(0),
            price: ActiveValue::Set(params.price),
            price_discount: ActiveValue::Set(params.price_discount),
            summary: ActiveValue::Set(params.summary),
            description: ActiveValue::Set(params.description),
            image_cover: ActiveValue::Set(params.image_cover),
            images: ActiveValue::Set(serde_json::json!(params.images)),
            created_at: ActiveValue::Set(Utc::now()),
            start_lat: ActiveValue::Set(start_lat),
            start_lng: ActiveValue::Set(start_lng),
            start_address: ActiveValue::Set(start_address),
            start_description: ActiveValue::Set(start_description),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.replace_start_dates(entity.id, params.start_dates).await?;
        self.replace_locations(entity.id, params.locations).await?;
        self.replace_guides(entity.id, params.guides).await?;

        self.load_one(entity).await
    }

    /// Finds a tour by ID with its relations loaded.
    ///
    /// # Returns
    /// - `Ok(Some(Tour))` - Tour found
    /// - `Ok(None)` - No tour with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Tour>, DbErr> {
        let Some(entity) = entity::prelude::Tour::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(Some(self.load_one(entity).await?))
    }

    /// Runs a prepared select (filters, sorting, pagination) and loads relations.
    pub async fn find_many(&self, select: Select<entity::tour::Entity>) -> Result<Vec<Tour>, DbErr> {
        let entities = select.all(self.db).await?;

        self.load_relations(entities).await
    }

    /// Checks whether a tour with the given ID exists.
    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Tour::find()
            .filter(entity::tour::Column::Id.eq(id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Applies a partial update to a tour.
    ///
    /// List fields that are present replace the stored rows entirely.
    ///
    /// # Returns
    /// - `Ok(Some(Tour))` - The updated tour
    /// - `Ok(None)` - No tour with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(&self, id: i32, params: UpdateTourParams) -> Result<Option<Tour>, DbErr> {
        let Some(entity) = entity::prelude::Tour::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::tour::ActiveModel = entity.clone().into();

        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(duration) = params.duration {
            active.duration = ActiveValue::Set(duration);
        }
        if let Some(max_group_size) = params.max_group_size {
            active.max_group_size = ActiveValue::Set(max_group_size);
        }
        if let Some(difficulty) = params.difficulty {
            active.difficulty = ActiveValue::Set(difficulty.as_str().to_string());
        }
        if let Some(ratings_average) = params.ratings_average {
            active.ratings_average = ActiveValue::Set(ratings_average);
        }
        if let Some(price) = params.price {
            active.price = ActiveValue::Set(price);
        }
        if let Some(price_discount) = params.price_discount {
            active.price_discount = ActiveValue::Set(Some(price_discount));
        }
        if let Some(summary) = params.summary {
            active.summary = ActiveValue::Set(summary);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(image_cover) = params.image_cover {
            active.image_cover = ActiveValue::Set(image_cover);
        }
        if let Some(images) = params.images {
            active.images = ActiveValue::Set(serde_json::json!(images));
        }
        if let Some(point) = params.start_location {
            let (lat, lng, address, description) = split_point(Some(point));
            active.start_lat = ActiveValue::Set(lat);
            active.start_lng = ActiveValue::Set(lng);
            active.start_address = ActiveValue::Set(address);
            active.start_description = ActiveValue::Set(description);
        }

        let entity = if active.is_changed() {
            active.update(self.db).await?
        } else {
            entity
        };

        if let Some(start_dates) = params.start_dates {
            self.replace_start_dates(id, start_dates).await?;
        }
        if let Some(locations) = params.locations {
            self.replace_locations(id, locations).await?;
        }
        if let Some(guides) = params.guides {
            self.replace_guides(id, guides).await?;
        }

        Ok(Some(self.load_one(entity).await?))
    }

    /// Deletes a tour together with its reviews and child rows.
    ///
    /// # Returns
    /// - `Ok(true)` - Tour deleted
    /// - `Ok(false)` - No tour with that ID
    /// - `Err(DbErr)` - Database error during deletion
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        entity::prelude::Review::delete_many()
            .filter(entity::review::Column::TourId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::TourStartDate::delete_many()
            .filter(entity::tour_start_date::Column::TourId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::TourLocation::delete_many()
            .filter(entity::tour_location::Column::TourId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::TourGuide::delete_many()
            .filter(entity::tour_guide::Column::TourId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Tour::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets all tours rated at least `min_rating`.
    pub async fn find_rated_at_least(&self, min_rating: f64) -> Result<Vec<Tour>, DbErr> {
        let entities = entity::prelude::Tour::find()
            .filter(entity::tour::Column::RatingsAverage.gte(min_rating))
            .order_by_asc(entity::tour::Column::Id)
            .all(self.db)
            .await?;

        self.load_relations(entities).await
    }

    /// Gets every tour that has a start location.
    pub async fn find_with_start_location(&self) -> Result<Vec<Tour>, DbErr> {
        let entities = entity::prelude::Tour::find()
            .filter(entity::tour::Column::StartLat.is_not_null())
            .filter(entity::tour::Column::StartLng.is_not_null())
            .order_by_asc(entity::tour::Column::Id)
            .all(self.db)
            .await?;

        self.load_relations(entities).await
    }

    /// Gets every start date in `[from, to)` joined with its tour's name.
    ///
    /// # Returns
    /// - `Ok(Vec<TourStart>)` - Start dates in ascending order
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_starts_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TourStart>, DbErr> {
        let rows = entity::prelude::TourStartDate::find()
            .filter(entity::tour_start_date::Column::StartDate.gte(from))
            .filter(entity::tour_start_date::Column::StartDate.lt(to))
            .order_by_asc(entity::tour_start_date::Column::StartDate)
            .find_also_related(entity::prelude::Tour)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(start, tour)| {
                tour.map(|tour| TourStart {
                    start_date: start.start_date,
                    tour_name: tour.name,
                })
            })
            .collect())
    }

    /// Persists a tour's review aggregate.
    pub async fn update_ratings(&self, tour_id: i32, summary: RatingSummary) -> Result<(), DbErr> {
        entity::prelude::Tour::update_many()
            .filter(entity::tour::Column::Id.eq(tour_id))
            .col_expr(
                entity::tour::Column::RatingsQuantity,
                Expr::value(summary.quantity),
            )
            .col_expr(
                entity::tour::Column::RatingsAverage,
                Expr::value(summary.average),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    async fn replace_start_dates(
        &self,
        tour_id: i32,
        start_dates: Vec<DateTime<Utc>>,
    ) -> Result<(), DbErr> {
        entity::prelude::TourStartDate::delete_many()
            .filter(entity::tour_start_date::Column::TourId.eq(tour_id))
            .exec(self.db)
            .await?;

        if start_dates.is_empty() {
            return Ok(());
        }

        let models = start_dates
            .into_iter()
            .map(|start_date| entity::tour_start_date::ActiveModel {
                tour_id: ActiveValue::Set(tour_id),
                start_date: ActiveValue::Set(start_date),
                ..Default::default()
            });

        entity::prelude::TourStartDate::insert_many(models)
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    async fn replace_locations(&self, tour_id: i32, locations: Vec<Location>) -> Result<(), DbErr> {
        entity::prelude::TourLocation::delete_many()
            .filter(entity::tour_location::Column::TourId.eq(tour_id))
            .exec(self.db)
            .await?;

        if locations.is_empty() {
            return Ok(());
        }

        let models = locations
            .into_iter()
            .enumerate()
            .map(|(position, location)| entity::tour_location::ActiveModel {
                tour_id: ActiveValue::Set(tour_id),
                position: ActiveValue::Set(position as i32),
                lng: ActiveValue::Set(location.point.lng),
                lat: ActiveValue::Set(location.point.lat),
                address: ActiveValue::Set(location.point.address),
                description: ActiveValue::Set(location.point.description),
                day: ActiveValue::Set(location.day),
                ..Default::default()
            });

        entity::prelude::TourLocation::insert_many(models)
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    async fn replace_guides(&self, tour_id: i32, mut guides: Vec<i32>) -> Result<(), DbErr> {
        entity::prelude::TourGuide::delete_many()
            .filter(entity::tour_guide::Column::TourId.eq(tour_id))
            .exec(self.db)
            .await?;

        guides.sort_unstable();
        guides.dedup();

        if guides.is_empty() {
            return Ok(());
        }

        let models = guides
            .into_iter()
            .map(|user_id| entity::tour_guide::ActiveModel {
                tour_id: ActiveValue::Set(tour_id),
                user_id: ActiveValue::Set(user_id),
            });

        entity::prelude::TourGuide::insert_many(models)
            .exec_without_returning(self.db)
            .await?;

        Ok(())
    }

    async fn load_one(&self, entity: entity::tour::Model) -> Result<Tour, DbErr> {
        let id = entity.id;

        self.load_relations(vec![entity])
            .await?
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound(format!("tour {}", id)))
    }

    /// Loads start dates, locations and active guides for a batch of tours.
    async fn load_relations(&self, tours: Vec<entity::tour::Model>) -> Result<Vec<Tour>, DbErr> {
        if tours.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = tours.iter().map(|tour| tour.id).collect();

        let mut start_dates: HashMap<i32, Vec<entity::tour_start_date::Model>> = HashMap::new();
        for row in entity::prelude::TourStartDate::find()
            .filter(entity::tour_start_date::Column::TourId.is_in(ids.clone()))
            .order_by_asc(entity::tour_start_date::Column::StartDate)
            .all(self.db)
            .await?
        {
            start_dates.entry(row.tour_id).or_default().push(row);
        }

        let mut locations: HashMap<i32, Vec<entity::tour_location::Model>> = HashMap::new();
        for row in entity::prelude::TourLocation::find()
            .filter(entity::tour_location::Column::TourId.is_in(ids.clone()))
            .order_by_asc(entity::tour_location::Column::Position)
            .all(self.db)
            .await?
        {
            locations.entry(row.tour_id).or_default().push(row);
        }

        let links = entity::prelude::TourGuide::find()
            .filter(entity::tour_guide::Column::TourId.is_in(ids))
            .order_by_asc(entity::tour_guide::Column::UserId)
            .all(self.db)
            .await?;

        let guide_ids: Vec<i32> = links.iter().map(|link| link.user_id).collect();
        let users: HashMap<i32, entity::user::Model> = if guide_ids.is_empty() {
            HashMap::new()
        } else {
            entity::prelude::User::find()
                .filter(entity::user::Column::Id.is_in(guide_ids))
                .filter(entity::user::Column::Active.eq(true))
                .all(self.db)
                .await?
                .into_iter()
                .map(|user| (user.id, user))
                .collect()
        };

        let mut guides: HashMap<i32, Vec<entity::user::Model>> = HashMap::new();
        for link in links {
            if let Some(user) = users.get(&link.user_id) {
                guides.entry(link.tour_id).or_default().push(user.clone());
            }
        }

        tours
            .into_iter()
            .map(|tour| {
                let id = tour.id;
                Tour::from_entity(
                    tour,
                    start_dates.remove(&id).unwrap_or_default(),
                    locations.remove(&id).unwrap_or_default(),
                    guides.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }
}

type PointColumns = (Option<f64>, Option<f64>, Option<String>, Option<String>);

fn split_point(point: Option<GeoPoint>) -> PointColumns {
    match point {
        Some(point) => (
            Some(point.lat),
            Some(point.lng),
            point.address,
            point.description,
        ),
        None => (None, None, None, None),
    }
}
