use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{tyre, tyre_company};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tyre_model")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub company_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Company,
    Tyre,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(tyre_company::Entity)
                .from(Column::CompanyId)
                .to(tyre_company::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Tyre => Entity::has_many(tyre::Entity).into(),
        }
    }
}

impl Related<tyre_company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl Related<tyre::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tyre.def() }
}

impl ActiveModelBehavior for ActiveModel {}
