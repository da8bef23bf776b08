pub mod auth_service;
pub mod user_repository;

#[allow(unused_imports)]
pub use auth_service::AuthService;
#[allow(unused_imports)]
pub use user_repository::UserRepository;
