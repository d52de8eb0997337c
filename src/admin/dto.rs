use serde::Serialize;

use super::repo_types::{Coach, Course};
use crate::users::repo_types::Role;

#[derive(Debug, Serialize)]
pub struct PromotedUser {
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct CoachData {
    pub user: PromotedUser,
    pub coach: Coach,
}

#[derive(Debug, Serialize)]
pub struct CourseData {
    pub course: Course,
}
