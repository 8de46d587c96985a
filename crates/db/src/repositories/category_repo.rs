//! Repository for the `categories` table.

use sqlx::{PgConnection, PgPool};

use crate::models::category::{Category, CategoryWithCount, CreateCategory};

const COLUMNS: &str = "id, name, description, parent_category, created_at";

pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category. A duplicate name violates `uq_categories_name`.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description, parent_category)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.parent_category)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE name = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// All categories by name, each with its live article count.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<CategoryWithCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.name, c.description, c.parent_category,
                    (SELECT COUNT(*) FROM articles a
                      WHERE a.deleted_at IS NULL AND c.name = ANY(a.categories)) AS article_count
             FROM categories c
             ORDER BY c.name",
        )
        .fetch_all(pool)
        .await
    }

    /// Create any of `names` that do not exist yet, with no description.
    pub async fn ensure_exist(conn: &mut PgConnection, names: &[String]) -> Result<(), sqlx::Error> {
        if names.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO categories (name)
             SELECT UNNEST($1::TEXT[])
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(names)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
