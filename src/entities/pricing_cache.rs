use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "pricing_cache")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub drug_name: String,
    pub zip_code: String,
    pub plan_type: String,
    pub pharmacy_type: String,
    #[sea_orm(column_type = "Double")]
    pub cost: f64,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
