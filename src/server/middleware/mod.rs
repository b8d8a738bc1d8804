//! Request guards and response middleware.

pub mod auth;
pub mod error_detail;

#[cfg(test)]
mod test;
