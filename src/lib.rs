#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod event_handler;
pub mod loader;
pub mod markdown;
pub mod models;
pub mod network;
pub mod renderer;
pub mod sidebar;
pub mod storage;
pub mod theme;
pub mod ui;
