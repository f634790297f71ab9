pub mod config;
pub mod content;
pub mod dates;
pub mod db;
pub mod error;
pub mod handlers;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod stats;
pub mod version;
