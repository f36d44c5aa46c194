use anyhow::{Context, Result};
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::entities::{payment_methods, prelude::*, users};

pub const DEFAULT_TEST_EMAIL: &str = "test@example.com";
pub const DEFAULT_TEST_PASSWORD: &str = "password123";

/// Identity echoed back to the caller after test-user creation. The plaintext
/// password is intentional; this is a development-only convenience.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CreatedUser {
    pub id: i32,
    pub email: String,
    pub password: String,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Create one deterministic user plus one payment method. Additive only;
    /// never touches existing rows.
    pub async fn create_test_user(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<CreatedUser> {
        let email = email.unwrap_or_else(|| DEFAULT_TEST_EMAIL.to_string());
        let password = password.unwrap_or_else(|| DEFAULT_TEST_PASSWORD.to_string());

        let insert = Users::insert(users::ActiveModel {
            email: Set(email.clone()),
            password: Set(password.clone()),
            first_name: Set("Test".to_string()),
            last_name: Set("User".to_string()),
            phone: Set("1234567890".to_string()),
            payment_info: Set("Visa ending 1111".to_string()),
            admin: Set(false),
            ..Default::default()
        })
        .exec(&self.conn)
        .await
        .context("Failed to insert test user")?;

        let user_id = insert.last_insert_id;

        PaymentMethods::insert(payment_methods::ActiveModel {
            user_id: Set(user_id),
            card_number: Set(4_111_111_111_111_111),
            cvv: Set(123),
            billing_zip: Set("90210".to_string()),
            ..Default::default()
        })
        .exec(&self.conn)
        .await
        .context("Failed to insert test user's payment method")?;

        Ok(CreatedUser {
            id: user_id,
            email,
            password,
        })
    }
}
