use sea_orm::{entity::prelude::*, ConnectionTrait, Set, QueryFilter};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub employee_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let at = email.find('@');
    match at {
        Some(i) if i > 0 && i + 1 < email.len() => Ok(()),
        _ => Err(errors::ModelError::Validation("invalid email".into())),
    }
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email.to_ascii_lowercase()))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    full_name: &str,
    email: &str,
    password_hash: String,
    is_admin: bool,
) -> Result<Model, errors::ModelError> {
    validate_email(email)?;
    if full_name.trim().is_empty() { return Err(errors::ModelError::Validation("fullName required".into())); }
    let am = ActiveModel {
        full_name: Set(full_name.trim().to_string()),
        email: Set(email.to_ascii_lowercase()),
        password_hash: Set(password_hash),
        is_admin: Set(is_admin),
        employee_id: Set(None),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::validate_email;

    #[test]
    fn email_needs_local_and_domain_parts() {
        assert!(validate_email("admin@shop.com").is_ok());
        assert!(validate_email("@shop.com").is_err());
        assert!(validate_email("admin@").is_err());
        assert!(validate_email("admin").is_err());
    }
}
