//! HTTP handlers for the Nearmart platform

mod auth;
mod business;
mod catalog;
mod discovery;
mod health;
mod notification;
mod offer;
mod payment;
mod user;

pub use auth::*;
pub use business::*;
pub use catalog::*;
pub use discovery::*;
pub use health::*;
pub use notification::*;
pub use offer::*;
pub use payment::*;
pub use user::*;
