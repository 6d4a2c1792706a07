pub mod popular_models;
pub mod rules;
