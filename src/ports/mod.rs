#[allow(unused_imports)]
pub mod auth_service;
#[allow(unused_imports)]
pub mod booking_read_model;
#[allow(unused_imports)]
pub mod event_store;
#[allow(unused_imports)]
pub mod user_repository;

#[allow(unused_imports)]
pub use auth_service::*;
#[allow(unused_imports)]
pub use booking_read_model::*;
#[allow(unused_imports)]
pub use event_store::*;
#[allow(unused_imports)]
pub use user_repository::*;
