//! Review data repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::server::{
    model::review::{CreateReviewParams, Review, UpdateReviewParams},
    util::api_features::{FieldKind, Queryable},
};

impl Queryable for entity::review::Entity {
    fn query_field(name: &str) -> Option<(Self::Column, FieldKind)> {
        use entity::review::Column;

        let field = match name {
            "id" => (Column::Id, FieldKind::Integer),
            "rating" => (Column::Rating, FieldKind::Float),
            "createdAt" => (Column::CreatedAt, FieldKind::Timestamp),
            "tour" => (Column::TourId, FieldKind::Integer),
            "user" => (Column::UserId, FieldKind::Integer),
            _ => return None,
        };

        Some(field)
    }

    fn id_column() -> Self::Column {
        entity::review::Column::Id
    }
}

/// Repository providing database operations for reviews.
///
/// Reviews are always returned with their author populated.
pub struct ReviewRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a review.
    ///
    /// # Returns
    /// - `Ok(Review)` - The created review with its author
    /// - `Err(DbErr)` - Database error, including a unique violation on `(tour_id, user_id)`
    pub async fn create(&self, params: CreateReviewParams) -> Result<Review, DbErr> {
        let entity = entity::review::ActiveModel {
            review: ActiveValue::Set(params.review),
            rating: ActiveValue::Set(params.rating),
            created_at: ActiveValue::Set(Utc::now()),
            tour_id: ActiveValue::Set(params.tour_id),
            user_id: ActiveValue::Set(params.user_id),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.with_author(entity).await
    }

    /// Finds a review by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Review))` - Review found
    /// - `Ok(None)` - No review with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Review>, DbErr> {
        let Some(entity) = entity::prelude::Review::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(Some(self.with_author(entity).await?))
    }

    /// Runs a prepared select (filters, sorting, pagination) and populates authors.
    pub async fn find_many(
        &self,
        select: Select<entity::review::Entity>,
    ) -> Result<Vec<Review>, DbErr> {
        let rows = select
            .find_also_related(entity::prelude::User)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(review, author)| author.map(|author| Review::from_entity(review, author)))
            .collect())
    }

    /// Gets all reviews of a tour, oldest first.
    pub async fn find_by_tour(&self, tour_id: i32) -> Result<Vec<Review>, DbErr> {
        let select = entity::prelude::Review::find()
            .filter(entity::review::Column::TourId.eq(tour_id))
            .order_by_asc(entity::review::Column::CreatedAt)
            .order_by_asc(entity::review::Column::Id);

        self.find_many(select).await
    }

    /// Checks whether a user has already reviewed a tour.
    pub async fn exists_for(&self, tour_id: i32, user_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Review::find()
            .filter(entity::review::Column::TourId.eq(tour_id))
            .filter(entity::review::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Applies a partial update to a review.
    ///
    /// # Returns
    /// - `Ok(Some(Review))` - The updated review
    /// - `Ok(None)` - No review with that ID
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        id: i32,
        params: UpdateReviewParams,
    ) -> Result<Option<Review>, DbErr> {
        let Some(entity) = entity::prelude::Review::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::review::ActiveModel = entity.clone().into();

        if let Some(review) = params.review {
            active.review = ActiveValue::Set(review);
        }
        if let Some(rating) = params.rating {
            active.rating = ActiveValue::Set(rating);
        }

        let entity = if active.is_changed() {
            active.update(self.db).await?
        } else {
            entity
        };

        Ok(Some(self.with_author(entity).await?))
    }

    /// Deletes a review.
    ///
    /// # Returns
    /// - `Ok(Some(tour_id))` - Review deleted; the ID of the tour it belonged to
    /// - `Ok(None)` - No review with that ID
    /// - `Err(DbErr)` - Database error during deletion
    pub async fn delete(&self, id: i32) -> Result<Option<i32>, DbErr> {
        let Some(entity) = entity::prelude::Review::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        entity::prelude::Review::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(Some(entity.tour_id))
    }

    /// Gets every rating given to a tour.
    pub async fn ratings_for_tour(&self, tour_id: i32) -> Result<Vec<f64>, DbErr> {
        entity::prelude::Review::find()
            .select_only()
            .column(entity::review::Column::Rating)
            .filter(entity::review::Column::TourId.eq(tour_id))
            .into_tuple::<f64>()
            .all(self.db)
            .await
    }

    /// Gets the IDs of every tour a user has reviewed.
    pub async fn tour_ids_for_user(&self, user_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Review::find()
            .select_only()
            .column(entity::review::Column::TourId)
            .filter(entity::review::Column::UserId.eq(user_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    async fn with_author(&self, entity: entity::review::Model) -> Result<Review, DbErr> {
        let author = entity::prelude::User::find_by_id(entity.user_id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {}", entity.user_id)))?;

        Ok(Review::from_entity(entity, author))
    }
}
