use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    admin::repo::{CoachRepository, CourseRepository, PgCoachRepository, PgCourseRepository},
    config::AppConfig,
    credit_packages::repo::{CreditPackageRepository, PgCreditPackageRepository},
    skills::repo::{PgSkillRepository, SkillRepository},
    users::repo::{PgUserRepository, UserRepository},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub credit_packages: Arc<dyn CreditPackageRepository>,
    pub coaches: Arc<dyn CoachRepository>,
    pub courses: Arc<dyn CourseRepository>,
}

impl AppState {
    /// Postgres-backed repositories sharing one pool.
    pub fn from_pool(config: AppConfig, db: PgPool) -> Self {
        Self {
            config: Arc::new(config),
            users: Arc::new(PgUserRepository::new(db.clone())),
            skills: Arc::new(PgSkillRepository::new(db.clone())),
            credit_packages: Arc::new(PgCreditPackageRepository::new(db.clone())),
            coaches: Arc::new(PgCoachRepository::new(db.clone())),
            courses: Arc::new(PgCourseRepository::new(db)),
        }
    }
}
