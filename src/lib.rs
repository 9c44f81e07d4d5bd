pub mod app;
pub mod auth;
pub mod calculator;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod db;
pub mod error;
pub mod exercises;
pub mod nutrition;
pub mod recipes;
pub mod state;
pub mod weight;
pub mod workouts;

#[cfg(test)]
mod test_utils;
