use std::sync::Arc;

use adapter::redis::RedisClient;
use adapter::repository::{
    attendee::AttendeeRepositoryImpl, auth::AuthRepositoryImpl, booking::BookingRepositoryImpl,
    event::EventRepositoryImpl, health::HealthCheckRepositoryImpl, user::UserRepositoryImpl,
};
use adapter::database::ConnectionPool;
use kernel::repository::{
    attendee::AttendeeRepository, auth::AuthRepository, booking::BookingRepository,
    event::EventRepository, health::HealthCheckRepository, user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    attendee_repository: Arc<dyn AttendeeRepository>,
    event_repository: Arc<dyn EventRepository>,
    booking_repository: Arc<dyn BookingRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: &AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let attendee_repository = Arc::new(AttendeeRepositoryImpl::new(pool.clone()));
        let event_repository = Arc::new(EventRepositoryImpl::new(pool.clone()));
        let booking_repository = Arc::new(BookingRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            user_repository,
            auth_repository,
            attendee_repository,
            event_repository,
            booking_repository,
        }
    }

    // テストなどで任意の実装を差し込むためのコンストラクタ
    pub fn from_repositories(repositories: Repositories) -> Self {
        let Repositories {
            health_check,
            user,
            auth,
            attendee,
            event,
            booking,
        } = repositories;
        Self {
            health_check_repository: health_check,
            user_repository: user,
            auth_repository: auth,
            attendee_repository: attendee,
            event_repository: event,
            booking_repository: booking,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn attendee_repository(&self) -> Arc<dyn AttendeeRepository> {
        self.attendee_repository.clone()
    }

    pub fn event_repository(&self) -> Arc<dyn EventRepository> {
        self.event_repository.clone()
    }

    pub fn booking_repository(&self) -> Arc<dyn BookingRepository> {
        self.booking_repository.clone()
    }
}

pub struct Repositories {
    pub health_check: Arc<dyn HealthCheckRepository>,
    pub user: Arc<dyn UserRepository>,
    pub auth: Arc<dyn AuthRepository>,
    pub attendee: Arc<dyn AttendeeRepository>,
    pub event: Arc<dyn EventRepository>,
    pub booking: Arc<dyn BookingRepository>,
}
