//! Query-string driven filtering, sorting, field selection and pagination.
//!
//! [`ApiFeatures`] is built once per list request from the raw query pairs and then
//! applied in two places: [`ApiFeatures::apply`] turns filters, sort keys and
//! pagination into a SeaORM `Select`, and [`ApiFeatures::project`] trims each
//! serialized document down to the requested fields.
//!
//! ```text
//! ?duration[gte]=5&difficulty=easy&sort=-price,name&fields=name,price&page=2&limit=10
//! ```
//!
//! Field names are the JSON names of the resource. Each entity declares which of them
//! clients may filter and sort on through [`Queryable`].

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select, Value};
use serde_json::Value as Json;

use crate::server::error::AppError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 100;
pub const DEFAULT_SORT: &str = "-createdAt";
/// Largest page size; larger `limit` values are capped to it.
pub const MAX_LIMIT: u64 = 1000;
/// Largest row offset the SQLite driver can bind.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// How a filter value is parsed before it reaches the database.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    /// Text restricted to a fixed set of values
    Enum(&'static [&'static str]),
    /// RFC 3339 timestamp or `YYYY-MM-DD` date (midnight UTC)
    Timestamp,
}

/// An entity whose columns can be addressed from the query string.
pub trait Queryable: EntityTrait {
    /// Resolves a JSON field name to its column and value kind.
    ///
    /// Returns `None` for fields clients may not filter or sort on.
    fn query_field(name: &str) -> Option<(Self::Column, FieldKind)>;

    /// Primary key column, appended as the final sort key.
    fn id_column() -> Self::Column;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Gt,
    Lte,
    Lt,
}

impl FilterOp {
    fn parse(op: &str) -> Option<Self> {
        match op {
            "gte" => Some(Self::Gte),
            "gt" => Some(Self::Gt),
            "lte" => Some(Self::Lte),
            "lt" => Some(Self::Lt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    All,
    Include { fields: Vec<String>, keep_id: bool },
    Exclude(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiFeatures {
    pub filters: Vec<Filter>,
    pub sort: Vec<SortKey>,
    pub projection: Projection,
    pub page: u64,
    pub limit: u64,
}

impl Default for ApiFeatures {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            sort: parse_sort(DEFAULT_SORT),
            projection: Projection::All,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ApiFeatures {
    /// Builds the query options from raw query-string pairs.
    ///
    /// # Returns
    /// - `Ok(ApiFeatures)` - Parsed options; filters are validated later by [`Self::apply`]
    /// - `Err(AppError::BadRequest)` - `fields` mixes inclusion and exclusion
    /// - `Err(AppError::InvalidValue)` - A filter key has an unknown operator
    pub fn from_query(pairs: Vec<(String, String)>) -> Result<Self, AppError> {
        let mut features = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "page" => features.page = parse_positive(&value).unwrap_or(DEFAULT_PAGE),
                "limit" => {
                    features.limit = parse_positive(&value)
                        .unwrap_or(DEFAULT_LIMIT)
                        .min(MAX_LIMIT)
                }
                "sort" => {
                    let sort = parse_sort(&value);
                    if !sort.is_empty() {
                        features.sort = sort;
                    }
                }
                "fields" => features.projection = parse_projection(&value)?,
                _ => features.filters.push(parse_filter(key, value)?),
            }
        }

        Ok(features)
    }

    /// Rows skipped before the requested page.
    ///
    /// Pages past the addressable range skip everything and come back empty.
    pub fn skip(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .checked_mul(self.limit)
            .map_or(MAX_OFFSET, |skip| skip.min(MAX_OFFSET))
    }

    /// Applies filters, sorting and pagination to a select.
    ///
    /// # Returns
    /// - `Ok(Select)` - The constrained query
    /// - `Err(AppError::InvalidValue)` - Unknown field or a value that does not parse
    ///   as the field's kind
    pub fn apply<E: Queryable>(&self, mut select: Select<E>) -> Result<Select<E>, AppError> {
        for filter in &self.filters {
            let (column, kind) = E::query_field(&filter.field)
                .ok_or_else(|| AppError::invalid_value(&filter.field, &filter.value))?;
            let value = parse_filter_value(&filter.field, kind, &filter.value)?;

            select = select.filter(match filter.op {
                FilterOp::Eq => column.eq(value),
                FilterOp::Gte => column.gte(value),
                FilterOp::Gt => column.gt(value),
                FilterOp::Lte => column.lte(value),
                FilterOp::Lt => column.lt(value),
            });
        }

        for key in &self.sort {
            let (column, _) = E::query_field(&key.field)
                .ok_or_else(|| AppError::invalid_value("sort", &key.field))?;
            let order = if key.descending { Order::Desc } else { Order::Asc };
            select = select.order_by(column, order);
        }

        Ok(select
            .order_by_asc(E::id_column())
            .offset(self.skip())
            .limit(self.limit))
    }

    /// Restricts a serialized document to the requested fields.
    ///
    /// Non-object values are returned untouched.
    pub fn project(&self, document: Json) -> Json {
        let Json::Object(mut object) = document else {
            return document;
        };

        match &self.projection {
            Projection::All => {}
            Projection::Include { fields, keep_id } => {
                object.retain(|key, _| {
                    (*keep_id && key == "id") || fields.iter().any(|field| field == key)
                });
            }
            Projection::Exclude(fields) => {
                object.retain(|key, _| !fields.iter().any(|field| field == key));
            }
        }

        Json::Object(object)
    }
}

fn parse_positive(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|n| *n > 0)
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn parse_sort(value: &str) -> Vec<SortKey> {
    split_list(value)
        .map(|item| match item.strip_prefix('-') {
            Some(field) => SortKey {
                field: field.to_string(),
                descending: true,
            },
            None => SortKey {
                field: item.to_string(),
                descending: false,
            },
        })
        .collect()
}

fn parse_projection(value: &str) -> Result<Projection, AppError> {
    let mut include = Vec::new();
    let mut exclude = Vec::new();

    for item in split_list(value) {
        match item.strip_prefix('-') {
            Some(field) => exclude.push(field.to_string()),
            None => include.push(item.to_string()),
        }
    }

    if include.is_empty() {
        if exclude.is_empty() {
            return Ok(Projection::All);
        }
        return Ok(Projection::Exclude(exclude));
    }

    // Only `id` may be excluded from an inclusion list.
    if exclude.iter().any(|field| field != "id") {
        return Err(AppError::BadRequest(
            "Cannot mix field inclusion and exclusion in fields.".to_string(),
        ));
    }

    Ok(Projection::Include {
        fields: include,
        keep_id: exclude.is_empty(),
    })
}

fn parse_filter(key: String, value: String) -> Result<Filter, AppError> {
    let Some((field, rest)) = key.split_once('[') else {
        return Ok(Filter {
            field: key,
            op: FilterOp::Eq,
            value,
        });
    };

    let op = rest
        .strip_suffix(']')
        .and_then(FilterOp::parse)
        .ok_or_else(|| AppError::invalid_value(&key, &value))?;

    Ok(Filter {
        field: field.to_string(),
        op,
        value,
    })
}

fn parse_filter_value(field: &str, kind: FieldKind, raw: &str) -> Result<Value, AppError> {
    let invalid = || AppError::invalid_value(field, raw);

    let value = match kind {
        FieldKind::Integer => Value::from(raw.trim().parse::<i64>().map_err(|_| invalid())?),
        FieldKind::Float => Value::from(raw.trim().parse::<f64>().map_err(|_| invalid())?),
        FieldKind::Text => Value::from(raw.to_string()),
        FieldKind::Enum(allowed) => {
            if !allowed.contains(&raw) {
                return Err(invalid());
            }
            Value::from(raw.to_string())
        }
        FieldKind::Timestamp => Value::from(parse_timestamp(raw).ok_or_else(invalid)?),
    };

    Ok(value)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_query() {
        let features = ApiFeatures::from_query(Vec::new()).unwrap();

        assert_eq!(features.page, 1);
        assert_eq!(features.limit, 100);
        assert_eq!(features.skip(), 0);
        assert_eq!(
            features.sort,
            vec![SortKey {
                field: "createdAt".to_string(),
                descending: true
            }]
        );
        assert_eq!(features.projection, Projection::All);
        assert!(features.filters.is_empty());
    }

    #[test]
    fn parses_comparison_filters() {
        let features = ApiFeatures::from_query(query(&[
            ("duration[gte]", "5"),
            ("difficulty", "easy"),
            ("price[lt]", "1500"),
        ]))
        .unwrap();

        assert_eq!(
            features.filters,
            vec![
                Filter {
                    field: "duration".to_string(),
                    op: FilterOp::Gte,
                    value: "5".to_string()
                },
                Filter {
                    field: "difficulty".to_string(),
                    op: FilterOp::Eq,
                    value: "easy".to_string()
                },
                Filter {
                    field: "price".to_string(),
                    op: FilterOp::Lt,
                    value: "1500".to_string()
                },
            ]
        );
    }

    #[test]
    fn rejects_unknown_operator() {
        let err = ApiFeatures::from_query(query(&[("price[ne]", "5")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid price[ne]: 5.");
    }

    #[test]
    fn reserved_keys_are_not_filters() {
        let features = ApiFeatures::from_query(query(&[
            ("page", "2"),
            ("limit", "10"),
            ("sort", "price"),
            ("fields", "name"),
        ]))
        .unwrap();

        assert!(features.filters.is_empty());
        assert_eq!(features.skip(), 10);
    }

    #[test]
    fn invalid_pagination_falls_back_to_defaults() {
        let features =
            ApiFeatures::from_query(query(&[("page", "zero"), ("limit", "0")])).unwrap();

        assert_eq!(features.page, DEFAULT_PAGE);
        assert_eq!(features.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn caps_limit_and_offset() {
        let features = ApiFeatures::from_query(query(&[
            ("page", "18446744073709551615"),
            ("limit", "18446744073709551615"),
        ]))
        .unwrap();

        assert_eq!(features.limit, MAX_LIMIT);
        assert_eq!(features.skip(), i64::MAX as u64);
    }

    #[test]
    fn parses_multi_key_sort() {
        let features = ApiFeatures::from_query(query(&[("sort", "-ratingsAverage,price")])).unwrap();

        assert_eq!(
            features.sort,
            vec![
                SortKey {
                    field: "ratingsAverage".to_string(),
                    descending: true
                },
                SortKey {
                    field: "price".to_string(),
                    descending: false
                },
            ]
        );
    }

    #[test]
    fn include_projection_keeps_id() {
        let features = ApiFeatures::from_query(query(&[("fields", "name,price")])).unwrap();
        let document = json!({"id": 1, "name": "The Sea Explorer", "price": 497, "summary": "x"});

        assert_eq!(
            features.project(document),
            json!({"id": 1, "name": "The Sea Explorer", "price": 497})
        );
    }

    #[test]
    fn include_projection_can_drop_id() {
        let features = ApiFeatures::from_query(query(&[("fields", "name,-id")])).unwrap();
        let document = json!({"id": 1, "name": "The Sea Explorer", "price": 497});

        assert_eq!(features.project(document), json!({"name": "The Sea Explorer"}));
    }

    #[test]
    fn exclude_projection() {
        let features = ApiFeatures::from_query(query(&[("fields", "-summary,-price")])).unwrap();
        let document = json!({"id": 1, "name": "The Sea Explorer", "price": 497, "summary": "x"});

        assert_eq!(
            features.project(document),
            json!({"id": 1, "name": "The Sea Explorer"})
        );
    }

    #[test]
    fn mixed_projection_is_rejected() {
        let result = ApiFeatures::from_query(query(&[("fields", "name,-price")]));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn parses_filter_values_by_kind() {
        assert!(parse_filter_value("duration", FieldKind::Integer, "abc").is_err());
        assert!(parse_filter_value("price", FieldKind::Float, "397.5").is_ok());
        assert!(
            parse_filter_value("difficulty", FieldKind::Enum(&["easy", "medium"]), "hard")
                .is_err()
        );
        assert!(parse_filter_value("createdAt", FieldKind::Timestamp, "2021-06-19").is_ok());
        assert!(
            parse_filter_value("createdAt", FieldKind::Timestamp, "2021-06-19T09:00:00Z").is_ok()
        );
        assert!(parse_filter_value("createdAt", FieldKind::Timestamp, "june").is_err());
    }
}
