mod review;
mod tour;
mod user;
