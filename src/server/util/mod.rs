pub mod api_features;
pub mod geo;
pub mod json;
pub mod parse;
