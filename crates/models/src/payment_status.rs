use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Seeded ids; see the `payment_status` migration.
pub const PENDING: i32 = 1;
pub const PARTIAL: i32 = 2;
pub const PAID: i32 = 3;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment_status")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
