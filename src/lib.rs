pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod views;
