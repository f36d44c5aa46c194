use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique, column_type = "String(StringLen::N(255))")]
    pub email: String,

    /// Plaintext by design: this schema only ever holds seeded dev data.
    #[sea_orm(column_type = "String(StringLen::N(64))")]
    pub password: String,

    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub first_name: String,

    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub last_name: String,

    #[sea_orm(column_type = "String(StringLen::N(20))")]
    pub phone: String,

    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub payment_info: String,

    pub admin: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payment_methods::Entity")]
    PaymentMethods,
    #[sea_orm(has_many = "super::referrals::Entity")]
    Referrals,
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::payment_methods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentMethods.def()
    }
}

impl Related<super::referrals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Referrals.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
