//! Tour business logic: CRUD, guide checks and the analytics endpoints.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::server::{
    data::{review::ReviewRepository, tour::TourRepository, user::UserRepository},
    error::AppError,
    model::tour::{
        CreateTourParams, MonthlyPlan, Tour, TourDetail, TourDistance, TourStats,
        UpdateTourParams, STATS_MIN_RATING,
    },
    util::{
        api_features::ApiFeatures,
        geo::{central_angle, distance_meters, DistanceUnit, LatLng},
    },
};

pub struct TourService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TourService<'a> {
    /// Creates a new TourService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists tours with filtering, sorting and pagination applied.
    ///
    /// # Returns
    /// - `Ok(Vec<Tour>)` - The requested page
    /// - `Err(AppError::InvalidValue)` - Unknown filter or sort field
    pub async fn get_all(&self, features: &ApiFeatures) -> Result<Vec<Tour>, AppError> {
        let select = features.apply(entity::prelude::Tour::find())?;
        let tours = TourRepository::new(self.db).find_many(select).await?;

        Ok(tours)
    }

    /// Gets a tour with its reviews.
    ///
    /// # Returns
    /// - `Ok(TourDetail)` - Tour, guides and reviews
    /// - `Err(AppError::NotFound)` - No tour with that ID
    pub async fn get_by_id(&self, id: i32) -> Result<TourDetail, AppError> {
        let tour = TourRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::document_not_found)?;

        let reviews = ReviewRepository::new(self.db).find_by_tour(id).await?;

        Ok(TourDetail { tour, reviews })
    }

    /// Creates a tour.
    ///
    /// # Returns
    /// - `Ok(Tour)` - The stored tour
    /// - `Err(AppError::InvalidValue)` - A guide ID is not an active user
    /// - `Err(AppError::DuplicateValue)` - Another tour has that name
    pub async fn create(&self, params: CreateTourParams) -> Result<Tour, AppError> {
        self.ensure_guides_exist(&params.guides).await?;

        let name = params.name.clone();
        let tour = TourRepository::new(self.db)
            .create(params)
            .await
            .map_err(|err| AppError::from_unique(err, Some(&name)))?;

        tracing::info!("Created tour {} ({})", tour.id, tour.name);

        Ok(tour)
    }

    /// Applies a partial update.
    ///
    /// # Returns
    /// - `Ok(Tour)` - The updated tour
    /// - `Err(AppError::NotFound)` - No tour with that ID
    /// - `Err(AppError::InvalidValue)` - A guide ID is not an active user
    /// - `Err(AppError::DuplicateValue)` - Another tour has the new name
    pub async fn update(&self, id: i32, params: UpdateTourParams) -> Result<Tour, AppError> {
        if let Some(guides) = &params.guides {
            self.ensure_guides_exist(guides).await?;
        }

        let name = params.name.clone();
        TourRepository::new(self.db)
            .update(id, params)
            .await
            .map_err(|err| AppError::from_unique(err, name.as_deref()))?
            .ok_or_else(AppError::document_not_found)
    }

    /// Deletes a tour with its reviews, dates, locations and guide links.
    ///
    /// # Returns
    /// - `Ok(())` - Tour deleted
    /// - `Err(AppError::NotFound)` - No tour with that ID
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !TourRepository::new(self.db).delete(id).await? {
            return Err(AppError::document_not_found());
        }

        tracing::info!("Deleted tour {}", id);

        Ok(())
    }

    /// Per-difficulty statistics over tours rated at least 4.5.
    pub async fn stats(&self) -> Result<Vec<TourStats>, AppError> {
        let tours = TourRepository::new(self.db)
            .find_rated_at_least(STATS_MIN_RATING)
            .await?;

        Ok(TourStats::compute(&tours))
    }

    /// Tour starts per month of the given year.
    ///
    /// # Returns
    /// - `Ok(Vec<MonthlyPlan>)` - Busiest months first, at most 12
    /// - `Err(AppError::InvalidValue)` - Year outside the supported calendar range
    pub async fn monthly_plan(&self, year: i32) -> Result<Vec<MonthlyPlan>, AppError> {
        let year_start = |year: i32| {
            Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
                .single()
                .ok_or_else(|| AppError::invalid_value("year", year.to_string()))
        };
        let from = year_start(year)?;
        let to = year_start(year + 1)?;

        let starts = TourRepository::new(self.db)
            .find_starts_between(from, to)
            .await?;

        Ok(MonthlyPlan::compute(starts))
    }

    /// Tours whose start location lies within `distance` of `center`.
    pub async fn within(
        &self,
        distance: f64,
        center: LatLng,
        unit: DistanceUnit,
    ) -> Result<Vec<Tour>, AppError> {
        let radius = unit.to_radians(distance);

        let tours = TourRepository::new(self.db)
            .find_with_start_location()
            .await?
            .into_iter()
            .filter(|tour| {
                start_point(tour).is_some_and(|start| central_angle(center, start) <= radius)
            })
            .collect();

        Ok(tours)
    }

    /// Distance from `point` to every tour's start location, nearest first.
    pub async fn distances(
        &self,
        point: LatLng,
        unit: DistanceUnit,
    ) -> Result<Vec<TourDistance>, AppError> {
        let mut distances: Vec<TourDistance> = TourRepository::new(self.db)
            .find_with_start_location()
            .await?
            .into_iter()
            .filter_map(|tour| {
                let start = start_point(&tour)?;
                Some(TourDistance {
                    id: tour.id,
                    name: tour.name,
                    distance: unit.from_meters(distance_meters(point, start)),
                })
            })
            .collect();

        distances.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        Ok(distances)
    }

    /// Rejects guide IDs that do not belong to an active user.
    async fn ensure_guides_exist(&self, guides: &[i32]) -> Result<(), AppError> {
        if guides.is_empty() {
            return Ok(());
        }

        let found: HashSet<i32> = UserRepository::new(self.db)
            .find_active_ids(guides)
            .await?
            .into_iter()
            .collect();

        let missing: Vec<String> = guides
            .iter()
            .filter(|id| !found.contains(*id))
            .map(i32::to_string)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::invalid_value("guides", missing.join(", ")));
        }

        Ok(())
    }
}

fn start_point(tour: &Tour) -> Option<LatLng> {
    tour.start_location.as_ref().map(|point| LatLng {
        lat: point.lat,
        lng: point.lng,
    })
}
