//! TaskDesk single-page app

pub mod app;
pub mod auth;
pub mod client;
pub mod components;
pub mod config;
pub mod navigation;
pub mod pages;
pub mod provider;
pub mod routes;
pub mod storage;
pub mod theme;

pub use app::App;
