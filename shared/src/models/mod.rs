//! Domain models for the Nearmart marketplace platform

mod business;
mod notification;
mod offer;
mod payment;
mod service;
mod user;

pub use business::*;
pub use notification::*;
pub use offer::*;
pub use payment::*;
pub use service::*;
pub use user::*;
