use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tyre_model;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tyre_company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    TyreModel,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::TyreModel => Entity::has_many(tyre_model::Entity).into(),
        }
    }
}

impl Related<tyre_model::Entity> for Entity {
    fn to() -> RelationDef { Relation::TyreModel.def() }
}

impl ActiveModelBehavior for ActiveModel {}
