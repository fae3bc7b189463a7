pub mod models;
pub mod poster;
