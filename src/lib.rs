#![allow(clippy::implicit_hasher)]

pub mod logging;
pub mod api;
pub mod components;
pub mod constants;
pub mod editor;
pub mod geometry;
pub mod models;
pub mod storage;

pub use components::app::App;
