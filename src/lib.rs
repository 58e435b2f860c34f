pub mod actions;
pub mod app;
pub mod config;
pub mod constants;
pub mod db;
pub mod dispatcher;
pub mod error;
pub mod form;
pub mod logger;
pub mod schema;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use db::{MySqlExecutor, ProcedureExecutor};
pub use dispatcher::{Dispatcher, FormController, Notice, Notifier, Outcome};
pub use error::{AppError, AppResult};
