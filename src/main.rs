use axum::http::{HeaderValue, Method, header};
use hall_booking_ddd::{
    adapters::mock::{
        auth_service::AuthService as MockAuthService,
        user_repository::UserRepository as MockUserRepository,
    },
    adapters::postgres::{
        booking_read_model::BookingReadModel as PostgresBookingReadModel,
        event_store::EventStore as PostgresEventStore,
    },
    api::{handlers::AppState, router::create_router},
    application::booking::ServiceDependencies,
    ports::user_repository::{NewUser, UserRepository as UserRepositoryTrait, UserRole},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 起動時に初期利用者を登録する
///
/// 利用者コンテキストに管理画面がないため、デモ用の利用者を
/// 起動のたびに登録する。
async fn seed_users(user_repository: &Arc<MockUserRepository>) {
    let users = [
        ("admin@example.com", "admin123", UserRole::Admin),
        ("user@example.com", "user123", UserRole::User),
        ("pratik@example.com", "pratik", UserRole::User),
        ("sneh@example.com", "sneh", UserRole::User),
    ];

    for (email, password, role) in users {
        user_repository
            .create(NewUser {
                email: email.to_string(),
                password: password.to_string(),
                role,
            })
            .await
            .expect("Failed to seed user");
    }

    tracing::info!("Seeded {} users", users.len());
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hall_booking_ddd=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection URL
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/hall_booking".into());

    tracing::info!("Database URL: {}", database_url);

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    // Initialize adapters
    let event_store = Arc::new(PostgresEventStore::new(pool.clone()));
    let booking_read_model = Arc::new(PostgresBookingReadModel::new(pool.clone()));
    let user_repository = Arc::new(MockUserRepository::new());
    let auth_service = Arc::new(MockAuthService::new(user_repository.clone()));

    // Seed demo users
    seed_users(&user_repository).await;

    // Create service dependencies
    let service_deps = ServiceDependencies {
        event_store,
        booking_read_model,
        user_repository,
    };

    // Create application state
    let app_state = Arc::new(AppState {
        service_deps,
        auth_service,
    });

    // CORS for the frontend origin
    let frontend_origin =
        std::env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".into());
    let cors = CorsLayer::new()
        .allow_origin(
            frontend_origin
                .parse::<HeaderValue>()
                .expect("Invalid frontend origin"),
        )
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    // Create router
    let app = create_router(app_state).layer(cors);

    // Server configuration
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
