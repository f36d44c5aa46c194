use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::experience_tags::Entity")]
    ExperienceTags,
}

impl Related<super::experience_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExperienceTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
