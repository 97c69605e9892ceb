pub mod breath;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod controller;
pub mod db;
pub mod models;
pub mod store;
pub mod terminal;
pub mod theme;
pub mod view;
