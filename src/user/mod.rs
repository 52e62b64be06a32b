//! User management for retromail.

mod repository;
mod service;
mod types;

pub use repository::UserRepository;
pub use service::{CreateUser, UserService};
pub use types::{Address, NewUser, User};
