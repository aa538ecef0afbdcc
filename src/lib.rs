pub mod app;
pub mod clipboard;
pub mod composer;
pub mod config;
pub mod logging;
pub mod service;
pub mod ui;
pub mod worker;
