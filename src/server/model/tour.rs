//! Tour domain models, parameters and aggregate computations.
//!
//! Aggregations (stats by difficulty, monthly plan, distances) are computed in Rust over
//! rows fetched by the repository, so they stay independent of the database backend.

use std::{collections::BTreeMap, str::FromStr};

use chrono::{DateTime, Datelike, Utc};
use sea_orm::DbErr;

use crate::{
    model::tour::{
        CreateTourDto, GeoPointDto, LocationDto, MonthlyPlanDto, TourDistanceDto, TourDto,
        TourStatsDto, UpdateTourDto,
    },
    server::model::{review::Review, user::User},
};

/// Rating given to tours that have never been reviewed.
pub const DEFAULT_RATINGS_AVERAGE: f64 = 4.5;

/// Tours rated at least this much are included in the stats.
pub const STATS_MIN_RATING: f64 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Difficult,
}

impl Difficulty {
    pub const VALUES: &'static [&'static str] = &["easy", "medium", "difficult"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Difficult => "difficult",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "difficult" => Ok(Self::Difficult),
            other => Err(other.to_string()),
        }
    }
}

/// A point on the map with optional labels.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    pub description: Option<String>,
}

impl GeoPoint {
    pub fn from_dto(dto: GeoPointDto) -> Self {
        let [lng, lat] = dto.coordinates;
        Self {
            lat,
            lng,
            address: dto.address,
            description: dto.description,
        }
    }

    pub fn into_dto(self) -> GeoPointDto {
        GeoPointDto {
            kind: "Point".to_string(),
            coordinates: [self.lng, self.lat],
            address: self.address,
            description: self.description,
        }
    }
}

/// An itinerary stop visited on `day` of the tour.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub point: GeoPoint,
    pub day: i32,
}

impl Location {
    pub fn from_entity(entity: entity::tour_location::Model) -> Self {
        Self {
            point: GeoPoint {
                lat: entity.lat,
                lng: entity.lng,
                address: entity.address,
                description: entity.description,
            },
            day: entity.day,
        }
    }

    pub fn from_dto(dto: LocationDto) -> Self {
        let [lng, lat] = dto.coordinates;
        Self {
            point: GeoPoint {
                lat,
                lng,
                address: dto.address,
                description: dto.description,
            },
            day: dto.day,
        }
    }

    pub fn into_dto(self) -> LocationDto {
        let point = self.point.into_dto();
        LocationDto {
            kind: point.kind,
            coordinates: point.coordinates,
            address: point.address,
            description: point.description,
            day: self.day,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub id: i32,
    pub name: String,
    pub duration: i32,
    pub max_group_size: i32,
    pub difficulty: Difficulty,
    pub ratings_average: f64,
    pub ratings_quantity: i32,
    pub price: f64,
    pub price_discount: Option<f64>,
    pub summary: String,
    pub description: Option<String>,
    pub image_cover: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub start_dates: Vec<DateTime<Utc>>,
    pub start_location: Option<GeoPoint>,
    pub locations: Vec<Location>,
    pub guides: Vec<User>,
}

impl Tour {
    /// Converts a tour row and its child rows to a domain model.
    ///
    /// Child rows are expected in display order (start dates ascending, locations by
    /// position).
    ///
    /// # Returns
    /// - `Ok(Tour)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Unknown difficulty, malformed images or guide role
    pub fn from_entity(
        entity: entity::tour::Model,
        start_dates: Vec<entity::tour_start_date::Model>,
        locations: Vec<entity::tour_location::Model>,
        guides: Vec<entity::user::Model>,
    ) -> Result<Self, DbErr> {
        let difficulty = entity
            .difficulty
            .parse::<Difficulty>()
            .map_err(|value| DbErr::Custom(format!("Failed to parse difficulty: {}", value)))?;

        let images: Vec<String> = serde_json::from_value(entity.images)
            .map_err(|e| DbErr::Custom(format!("Failed to parse images: {}", e)))?;

        let start_location = match (entity.start_lat, entity.start_lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint {
                lat,
                lng,
                address: entity.start_address,
                description: entity.start_description,
            }),
            _ => None,
        };

        let guides = guides
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            duration: entity.duration,
            max_group_size: entity.max_group_size,
            difficulty,
            ratings_average: entity.ratings_average,
            ratings_quantity: entity.ratings_quantity,
            price: entity.price,
            price_discount: entity.price_discount,
            summary: entity.summary,
            description: entity.description,
            image_cover: entity.image_cover,
            images,
            created_at: entity.created_at,
            start_dates: start_dates.into_iter().map(|d| d.start_date).collect(),
            start_location,
            locations: locations.into_iter().map(Location::from_entity).collect(),
            guides,
        })
    }

    /// Tour length in weeks, derived from the duration in days.
    pub fn duration_weeks(&self) -> f64 {
        f64::from(self.duration) / 7.0
    }

    pub fn into_dto(self) -> TourDto {
        TourDto {
            id: self.id,
            duration_weeks: self.duration_weeks(),
            name: self.name,
            duration: self.duration,
            max_group_size: self.max_group_size,
            difficulty: self.difficulty.as_str().to_string(),
            ratings_average: self.ratings_average,
            ratings_quantity: self.ratings_quantity,
            price: self.price,
            price_discount: self.price_discount,
            summary: self.summary,
            description: self.description,
            image_cover: self.image_cover,
            images: self.images,
            created_at: self.created_at,
            start_dates: self.start_dates,
            start_location: self.start_location.map(GeoPoint::into_dto),
            locations: self.locations.into_iter().map(Location::into_dto).collect(),
            guides: self.guides.into_iter().map(User::into_dto).collect(),
            reviews: None,
        }
    }
}

/// A single tour together with its reviews.
#[derive(Debug, Clone)]
pub struct TourDetail {
    pub tour: Tour,
    pub reviews: Vec<Review>,
}

impl TourDetail {
    pub fn into_dto(self) -> TourDto {
        TourDto {
            reviews: Some(self.reviews.into_iter().map(Review::into_dto).collect()),
            ..self.tour.into_dto()
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTourParams {
    pub name: String,
    pub duration: i32,
    pub max_group_size: i32,
    pub difficulty: Difficulty,
    pub ratings_average: f64,
    pub price: f64,
    pub price_discount: Option<f64>,
    pub summary: String,
    pub description: Option<String>,
    pub image_cover: String,
    pub images: Vec<String>,
    pub start_dates: Vec<DateTime<Utc>>,
    pub start_location: Option<GeoPoint>,
    pub locations: Vec<Location>,
    pub guides: Vec<i32>,
}

impl CreateTourParams {
    /// Converts a validated creation DTO into parameters.
    ///
    /// # Returns
    /// - `Ok(CreateTourParams)` - Converted parameters
    /// - `Err(String)` - Difficulty is not a known value
    pub fn from_dto(dto: CreateTourDto) -> Result<Self, String> {
        Ok(Self {
            name: dto.name,
            duration: dto.duration,
            max_group_size: dto.max_group_size,
            difficulty: dto.difficulty.parse()?,
            ratings_average: round_rating(dto.ratings_average.unwrap_or(DEFAULT_RATINGS_AVERAGE)),
            price: dto.price,
            price_discount: dto.price_discount,
            summary: dto.summary,
            description: dto.description,
            image_cover: dto.image_cover,
            images: dto.images,
            start_dates: dto.start_dates,
            start_location: dto.start_location.map(GeoPoint::from_dto),
            locations: dto.locations.into_iter().map(Location::from_dto).collect(),
            guides: dto.guides,
        })
    }
}

/// Partial tour update. `None` fields are left untouched; list fields replace the
/// stored list entirely.
#[derive(Debug, Clone, Default)]
pub struct UpdateTourParams {
    pub name: Option<String>,
    pub duration: Option<i32>,
    pub max_group_size: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub ratings_average: Option<f64>,
    pub price: Option<f64>,
    pub price_discount: Option<f64>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_cover: Option<String>,
    pub images: Option<Vec<String>>,
    pub start_dates: Option<Vec<DateTime<Utc>>>,
    pub start_location: Option<GeoPoint>,
    pub locations: Option<Vec<Location>>,
    pub guides: Option<Vec<i32>>,
}

impl UpdateTourParams {
    pub fn from_dto(dto: UpdateTourDto) -> Result<Self, String> {
        Ok(Self {
            name: dto.name,
            duration: dto.duration,
            max_group_size: dto.max_group_size,
            difficulty: dto.difficulty.as_deref().map(str::parse).transpose()?,
            ratings_average: dto.ratings_average.map(round_rating),
            price: dto.price,
            price_discount: dto.price_discount,
            summary: dto.summary,
            description: dto.description,
            image_cover: dto.image_cover,
            images: dto.images,
            start_dates: dto.start_dates,
            start_location: dto.start_location.map(GeoPoint::from_dto),
            locations: dto
                .locations
                .map(|locations| locations.into_iter().map(Location::from_dto).collect()),
            guides: dto.guides,
        })
    }
}

/// Aggregate for one difficulty level.
#[derive(Debug, Clone, PartialEq)]
pub struct TourStats {
    pub difficulty: Difficulty,
    pub num_tours: usize,
    pub num_ratings: i64,
    pub avg_rating: f64,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

impl TourStats {
    /// Groups tours by difficulty, sorted by average price ascending.
    pub fn compute(tours: &[Tour]) -> Vec<Self> {
        let mut groups: BTreeMap<Difficulty, Vec<&Tour>> = BTreeMap::new();
        for tour in tours {
            groups.entry(tour.difficulty).or_default().push(tour);
        }

        let mut stats: Vec<Self> = groups
            .into_iter()
            .map(|(difficulty, tours)| {
                let count = tours.len() as f64;
                Self {
                    difficulty,
                    num_tours: tours.len(),
                    num_ratings: tours.iter().map(|t| i64::from(t.ratings_quantity)).sum(),
                    avg_rating: tours.iter().map(|t| t.ratings_average).sum::<f64>() / count,
                    avg_price: tours.iter().map(|t| t.price).sum::<f64>() / count,
                    min_price: tours.iter().map(|t| t.price).fold(f64::INFINITY, f64::min),
                    max_price: tours.iter().map(|t| t.price).fold(f64::NEG_INFINITY, f64::max),
                }
            })
            .collect();

        stats.sort_by(|a, b| a.avg_price.total_cmp(&b.avg_price));
        stats
    }

    pub fn into_dto(self) -> TourStatsDto {
        TourStatsDto {
            difficulty: self.difficulty.as_str().to_uppercase(),
            num_tours: self.num_tours,
            num_ratings: self.num_ratings,
            avg_rating: self.avg_rating,
            avg_price: self.avg_price,
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

/// A tour start date joined with the tour's name.
#[derive(Debug, Clone, PartialEq)]
pub struct TourStart {
    pub start_date: DateTime<Utc>,
    pub tour_name: String,
}

/// Tours starting in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPlan {
    pub month: u32,
    pub tours: Vec<String>,
}

impl MonthlyPlan {
    /// Groups start dates by month, busiest month first, ties by month; at most 12.
    pub fn compute(starts: Vec<TourStart>) -> Vec<Self> {
        let mut months: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for start in starts {
            months
                .entry(start.start_date.month())
                .or_default()
                .push(start.tour_name);
        }

        let mut plan: Vec<Self> = months
            .into_iter()
            .map(|(month, tours)| Self { month, tours })
            .collect();

        plan.sort_by(|a, b| b.tours.len().cmp(&a.tours.len()).then(a.month.cmp(&b.month)));
        plan.truncate(12);
        plan
    }

    pub fn into_dto(self) -> MonthlyPlanDto {
        MonthlyPlanDto {
            month: self.month,
            num_tour_starts: self.tours.len(),
            tours: self.tours,
        }
    }
}

/// Distance from a reference point to a tour's start location.
#[derive(Debug, Clone, PartialEq)]
pub struct TourDistance {
    pub id: i32,
    pub name: String,
    pub distance: f64,
}

impl TourDistance {
    pub fn into_dto(self) -> TourDistanceDto {
        TourDistanceDto {
            id: self.id,
            name: self.name,
            distance: self.distance,
        }
    }
}

/// Rounds a rating to one decimal place.
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
