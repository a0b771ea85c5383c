pub mod create_user;
pub mod delete_user;
pub mod get_current_user;
pub mod get_user;
pub mod list_users;
pub mod update_current_user;
pub mod update_user;

pub use create_user::create_user;
use chrono::DateTime;
use chrono::Utc;
pub use delete_user::delete_user;
pub use get_current_user::get_current_user;
pub use get_user::get_user;
pub use list_users::list_users;
use serde::Serialize;
pub use update_current_user::update_current_user;
pub use update_user::update_user;

use crate::domain::user::models::User;

/// Public projection of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub email: String,
    pub is_active: bool,
    pub is_moderator: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            is_active: user.is_active,
            is_moderator: user.is_moderator,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
