use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors, service_order};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_id: i32,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ServiceOrder }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceOrder => Entity::belongs_to(service_order::Entity)
                .from(Column::ServiceId)
                .to(service_order::Column::Id)
                .into(),
        }
    }
}

impl Related<service_order::Entity> for Entity {
    fn to() -> RelationDef { Relation::ServiceOrder.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const DESCRIPTION_MAX: usize = 255;
/// DECIMAL(10,2): eight integer digits.
pub const PRICE_MAX: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 0);

pub fn validate_description(d: &str) -> Result<(), errors::ModelError> {
    if d.trim().is_empty() {
        return Err(errors::ModelError::Validation("item description required".into()));
    }
    if d.chars().count() > DESCRIPTION_MAX {
        return Err(errors::ModelError::Validation(format!("item description must be at most {DESCRIPTION_MAX} characters")));
    }
    Ok(())
}

pub fn validate_price(price: Decimal) -> Result<(), errors::ModelError> {
    if price < Decimal::ZERO {
        return Err(errors::ModelError::Validation("item price must not be negative".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(errors::ModelError::Validation("item price must have at most 2 decimal places".into()));
    }
    if price > PRICE_MAX {
        return Err(errors::ModelError::Validation("item price is too large".into()));
    }
    Ok(())
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    service_id: i32,
    description: &str,
    price: Decimal,
) -> Result<Model, errors::ModelError> {
    validate_description(description)?;
    validate_price(price)?;
    let am = ActiveModel {
        service_id: Set(service_id),
        description: Set(description.trim().to_string()),
        price: Set(price),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Append items to an existing service order, preserving input order.
pub async fn insert_many<C: ConnectionTrait>(
    db: &C,
    service_id: i32,
    items: &[(String, Decimal)],
) -> Result<Vec<Model>, errors::ModelError> {
    let mut created = Vec::with_capacity(items.len());
    for (description, price) in items {
        created.push(insert(db, service_id, description, *price).await?);
    }
    Ok(created)
}
