use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors, payment_type, service_item, service_order};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_id: i32,
    pub payment_type_id: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub paid_value: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ServiceOrder, PaymentType }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceOrder => Entity::belongs_to(service_order::Entity)
                .from(Column::ServiceId)
                .to(service_order::Column::Id)
                .into(),
            Relation::PaymentType => Entity::belongs_to(payment_type::Entity)
                .from(Column::PaymentTypeId)
                .to(payment_type::Column::Id)
                .into(),
        }
    }
}

impl Related<service_order::Entity> for Entity {
    fn to() -> RelationDef { Relation::ServiceOrder.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Same column shape as item prices.
pub const PAID_VALUE_MAX: Decimal = service_item::PRICE_MAX;

pub fn validate_paid_value(value: Decimal) -> Result<(), errors::ModelError> {
    if value.normalize().scale() > 2 {
        return Err(errors::ModelError::Validation("value must have at most 2 decimal places".into()));
    }
    if value > PAID_VALUE_MAX {
        return Err(errors::ModelError::Validation("value is too large".into()));
    }
    Ok(())
}

/// Append one settlement record. Rows are never updated or deleted.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    service_id: i32,
    payment_type_id: i32,
    paid_value: Decimal,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        service_id: Set(service_id),
        payment_type_id: Set(payment_type_id),
        paid_value: Set(paid_value),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
