use super::Database;
use crate::domain::entities::{Template, TemplateMetadata};
use crate::domain::errors::DomainResult;
use crate::domain::ports::template_repository::{TemplateFilter, TemplateRepository};
use async_trait::async_trait;
use sqlx::{any::AnyRow, Row};

const TEMPLATE_COLUMNS: &str =
    "id, name, category, blocks, tags, is_public, usage_count, rating, created_at, updated_at";

fn template_from_row(row: &AnyRow) -> DomainResult<Template> {
    let blocks: String = row.try_get("blocks")?;
    let tags: String = row.try_get("tags")?;
    let is_public: i64 = row.try_get("is_public")?;

    Ok(Template {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        category: row.try_get("category")?,
        blocks: serde_json::from_str(&blocks)?,
        metadata: TemplateMetadata {
            tags: serde_json::from_str(&tags)?,
            is_public: is_public != 0,
            usage_count: row.try_get("usage_count")?,
            rating: row.try_get("rating")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        },
    })
}

/// Builds the WHERE clause and its bind values for a filter
fn filter_clause(filter: &TemplateFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut binds = Vec::new();

    if let Some(category) = filter.category.as_deref().filter(|c| !c.is_empty()) {
        conditions.push("category = ?");
        binds.push(category.to_string());
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        conditions.push("LOWER(name) LIKE ? ESCAPE '\\'");
        binds.push(format!("%{}%", escape_like(&search.to_lowercase())));
    }

    if conditions.is_empty() {
        (String::new(), binds)
    } else {
        (format!("WHERE {}", conditions.join(" AND ")), binds)
    }
}

/// Make `%`, `_` and the escape character match literally
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[async_trait]
impl TemplateRepository for Database {
    async fn create_template(&self, template: &Template) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO templates (id, name, category, blocks, tags, is_public, usage_count, rating, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&template.id)
        .bind(&template.name)
        .bind(&template.category)
        .bind(serde_json::to_string(&template.blocks)?)
        .bind(serde_json::to_string(&template.metadata.tags)?)
        .bind(template.metadata.is_public as i64)
        .bind(template.metadata.usage_count)
        .bind(template.metadata.rating)
        .bind(&template.metadata.created_at)
        .bind(&template.metadata.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_template(&self, id: &str) -> DomainResult<Option<Template>> {
        let row = sqlx::query(&format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(template_from_row).transpose()
    }

    async fn list_templates(
        &self,
        filter: &TemplateFilter,
        limit: i64,
        offset: i64,
    ) -> DomainResult<Vec<Template>> {
        let (where_clause, binds) = filter_clause(filter);
        let sql = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates {where_clause}
             ORDER BY updated_at DESC, rowid DESC
             LIMIT ? OFFSET ?"
        );

        let mut query = sqlx::query(&sql);
        for value in &binds {
            query = query.bind(value);
        }
        let rows = query.bind(limit).bind(offset).fetch_all(&self.pool).await?;

        rows.iter().map(template_from_row).collect()
    }

    async fn count_templates(&self, filter: &TemplateFilter) -> DomainResult<i64> {
        let (where_clause, binds) = filter_clause(filter);
        let sql = format!("SELECT COUNT(*) AS count FROM templates {where_clause}");

        let mut query = sqlx::query(&sql);
        for value in &binds {
            query = query.bind(value);
        }
        let row = query.fetch_one(&self.pool).await?;

        Ok(row.try_get("count")?)
    }

    async fn update_template(&self, template: &Template) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE templates
             SET name = ?, category = ?, blocks = ?, tags = ?, is_public = ?, rating = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&template.name)
        .bind(&template.category)
        .bind(serde_json::to_string(&template.blocks)?)
        .bind(serde_json::to_string(&template.metadata.tags)?)
        .bind(template.metadata.is_public as i64)
        .bind(template.metadata.rating)
        .bind(&template.metadata.updated_at)
        .bind(&template.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_template(&self, id: &str) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_usage(&self, id: &str) -> DomainResult<()> {
        sqlx::query("UPDATE templates SET usage_count = usage_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
