use super::Database;
use crate::domain::entities::{Contact, ContactListSummary};
use crate::domain::errors::DomainResult;
use crate::domain::ports::contact_repository::ContactRepository;
use async_trait::async_trait;
use sqlx::{any::AnyRow, Row};

const CONTACT_COLUMNS: &str =
    "id, name, email, company, custom1, custom2, list_name, created_at";

fn contact_from_row(row: &AnyRow) -> Result<Contact, sqlx::Error> {
    Ok(Contact {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        company: row.try_get("company")?,
        custom1: row.try_get("custom1")?,
        custom2: row.try_get("custom2")?,
        list_name: row.try_get("list_name")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl ContactRepository for Database {
    async fn insert_contacts(&self, contacts: &[Contact]) -> DomainResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for contact in contacts {
            let result = sqlx::query(
                "INSERT INTO contacts (id, name, email, company, custom1, custom2, list_name, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&contact.id)
            .bind(&contact.name)
            .bind(&contact.email)
            .bind(&contact.company)
            .bind(&contact.custom1)
            .bind(&contact.custom2)
            .bind(&contact.list_name)
            .bind(&contact.created_at)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn list_summaries(&self) -> DomainResult<Vec<ContactListSummary>> {
        let rows = sqlx::query(
            "SELECT list_name, COUNT(*) AS count
             FROM contacts
             GROUP BY list_name
             ORDER BY list_name",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut summaries = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row.try_get("list_name")?;
            summaries.push(ContactListSummary {
                id: name.clone(),
                name,
                count: row.try_get("count")?,
            });
        }
        Ok(summaries)
    }

    async fn find_by_list(&self, list_name: &str) -> DomainResult<Vec<Contact>> {
        let rows = sqlx::query(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE list_name = ? ORDER BY created_at, rowid"
        ))
        .bind(list_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(contact_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn list_contacts(
        &self,
        list_name: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DomainResult<Vec<Contact>> {
        let rows = match list_name {
            Some(list_name) => {
                sqlx::query(&format!(
                    "SELECT {CONTACT_COLUMNS} FROM contacts
                     WHERE list_name = ?
                     ORDER BY created_at DESC, rowid DESC
                     LIMIT ? OFFSET ?"
                ))
                .bind(list_name)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {CONTACT_COLUMNS} FROM contacts
                     ORDER BY created_at DESC, rowid DESC
                     LIMIT ? OFFSET ?"
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows
            .iter()
            .map(contact_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn count_contacts(&self, list_name: Option<&str>) -> DomainResult<i64> {
        let row = match list_name {
            Some(list_name) => {
                sqlx::query("SELECT COUNT(*) AS count FROM contacts WHERE list_name = ?")
                    .bind(list_name)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("SELECT COUNT(*) AS count FROM contacts")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(row.try_get("count")?)
    }

    async fn delete_list(&self, list_name: &str) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM contacts WHERE list_name = ?")
            .bind(list_name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
