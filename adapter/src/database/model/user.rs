use kernel::model::{id::UserId, user::User};

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub name: String,
    pub dni: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<UserRow> for User {
    fn from(value: UserRow) -> Self {
        let UserRow {
            user_id,
            name,
            dni,
            email,
            phone,
        } = value;
        User {
            id: user_id,
            name,
            dni,
            email,
            phone,
        }
    }
}
