//! Repository for the `customers` table.

use sqlx::PgPool;
use writinghub_core::types::DbId;

use crate::models::customer::{ContactDetails, Customer, CustomerListParams, UpdateCustomer};

/// Column list for `customers` queries.
const COLUMNS: &str = "\
    id, email, full_name, phone, organization, customer_type, \
    is_active, notes, registration_date, last_contact";

/// Provides get-or-create and staff edits for customers. Customers are
/// never hard-deleted.
pub struct CustomerRepo;

impl CustomerRepo {
    /// Find the customer with this email, creating one if none exists.
    ///
    /// Either way `last_contact` is refreshed. An existing customer keeps
    /// their name; a blank phone is filled in from the new contact.
    pub async fn upsert_contact(
        pool: &PgPool,
        contact: &ContactDetails,
    ) -> Result<Customer, sqlx::Error> {
        let query = format!(
            "INSERT INTO customers (email, full_name, phone, last_contact) \
             VALUES ($1, $2, COALESCE($3, ''), NOW()) \
             ON CONFLICT (email) DO UPDATE SET \
                last_contact = NOW(), \
                phone = CASE WHEN customers.phone = '' THEN EXCLUDED.phone \
                             ELSE customers.phone END \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(&contact.email)
            .bind(&contact.full_name)
            .bind(&contact.phone)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE id = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a customer by an already-normalized email.
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM customers WHERE email = $1");
        sqlx::query_as::<_, Customer>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List customers, newest registration first.
    pub async fn list(
        pool: &PgPool,
        params: &CustomerListParams,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM customers \
             WHERE ($1::BOOLEAN IS NULL OR is_active = $1) \
             ORDER BY registration_date DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(params.is_active)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply staff edits. Returns `None` if the customer does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCustomer,
    ) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                organization = COALESCE($4, organization),
                customer_type = COALESCE($5, customer_type),
                notes = COALESCE($6, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.organization)
            .bind(input.customer_type.map(|t| t.as_str()))
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Flip `is_active`. Returns `None` if the customer does not exist.
    pub async fn toggle_active(pool: &PgPool, id: DbId) -> Result<Option<Customer>, sqlx::Error> {
        let query = format!(
            "UPDATE customers SET is_active = NOT is_active WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
