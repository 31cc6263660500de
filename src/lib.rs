#[macro_use]
extern crate diesel;

pub mod actions;
pub mod bootstrap;
pub mod config;
pub mod display;
pub mod errors;
pub mod intake;
pub mod models;
#[rustfmt::skip]
pub mod schema;
pub mod seed;
