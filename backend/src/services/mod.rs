//! Business logic services for the Nearmart platform

pub mod auth;
pub mod business;
pub mod catalog;
pub mod discovery;
pub mod notification;
pub mod offer;
pub mod payment;
pub mod user;

pub use auth::AuthService;
pub use business::BusinessService;
pub use catalog::CatalogService;
pub use discovery::DiscoveryService;
pub use notification::NotificationService;
pub use offer::OfferService;
pub use payment::PaymentService;
pub use user::UserService;
