use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, payment_history, payment_status, service_item};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_order")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_name: String,
    pub description: Option<String>,
    pub employee_id: Option<i32>,
    pub payment_status_id: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    PaymentStatus,
    Items,
    Payments,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::PaymentStatus => Entity::belongs_to(payment_status::Entity)
                .from(Column::PaymentStatusId)
                .to(payment_status::Column::Id)
                .into(),
            Relation::Items => Entity::has_many(service_item::Entity).into(),
            Relation::Payments => Entity::has_many(payment_history::Entity).into(),
        }
    }
}

impl Related<service_item::Entity> for Entity {
    fn to() -> RelationDef { Relation::Items.def() }
}

impl Related<payment_history::Entity> for Entity {
    fn to() -> RelationDef { Relation::Payments.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const CLIENT_NAME_MAX: usize = 128;

pub fn validate_client_name(name: &str) -> Result<(), errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("clientName required".into()));
    }
    if trimmed.chars().count() > CLIENT_NAME_MAX {
        return Err(errors::ModelError::Validation(format!("clientName must be at most {CLIENT_NAME_MAX} characters")));
    }
    Ok(())
}

/// Insert a bare service order in PENDING state. Accepts a transaction so the
/// caller can insert items atomically alongside it.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    client_name: &str,
    description: Option<String>,
    employee_id: Option<i32>,
) -> Result<Model, errors::ModelError> {
    validate_client_name(client_name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        client_name: Set(client_name.trim().to_string()),
        description: Set(description),
        employee_id: Set(employee_id),
        payment_status_id: Set(payment_status::PENDING),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn update_payment_status<C: ConnectionTrait>(db: &C, id: i32, status_id: i32) -> Result<Model, errors::ModelError> {
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::Validation("service order not found".into()))?
        .into();
    found.payment_status_id = Set(status_id);
    found.updated_at = Set(Utc::now().into());
    found.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Returns the number of rows removed; zero means the id did not exist.
pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_name_rules() {
        assert!(validate_client_name("Maria Souza").is_ok());
        assert!(validate_client_name("   ").is_err());
        assert!(validate_client_name(&"x".repeat(CLIENT_NAME_MAX + 1)).is_err());
    }
}
