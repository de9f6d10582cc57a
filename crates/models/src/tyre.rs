use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tyre_model;

/// One tyre row; the dimension triple lives inline in the three
/// `dimensions_*` columns.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tyre")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub dimensions_width: i32,
    pub dimensions_profile: i32,
    pub dimensions_rim_size: i32,
    pub model_id: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub price: Decimal,
    #[sea_orm(column_type = "Double")]
    pub discount_percentage: f64,
    pub load_index: i32,
    pub speed_index: String,
    pub availability: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Model,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Model => Entity::belongs_to(tyre_model::Entity)
                .from(Column::ModelId)
                .to(tyre_model::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<tyre_model::Entity> for Entity {
    fn to() -> RelationDef { Relation::Model.def() }
}

impl ActiveModelBehavior for ActiveModel {}
