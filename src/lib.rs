#![doc = "The `todo_expert` library crate."]
#![doc = ""]
#![doc = "Domain models, repositories, services, authentication, the admin access log"]
#![doc = "and HTTP routing for the todo-expert backend. The binary (`main.rs`) wires"]
#![doc = "these together over PostgreSQL and the live weather feed."]

pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod weather;

pub use crate::error::AppError;
pub use crate::services::{AppState, Repositories};
