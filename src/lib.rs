pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod services;
pub mod view;

pub use app::{App, Event, Flow};
pub use config::Config;
pub use error::{AppError, AppResult, ErrorKind};
