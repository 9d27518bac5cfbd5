use super::RafflerStore;
use crate::{error::RaffleResult, quick_decision::QuickDecision};
use rusqlite::params;

impl RafflerStore {
    // ── Quick decisions ───────────────────────────────────────────

    pub fn all_quick_decisions(&self) -> RaffleResult<Vec<QuickDecision>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, locale, description, value_list
             FROM quick_decision ORDER BY rowid ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, locale, description, values)| {
                Ok(QuickDecision {
                    id,
                    locale,
                    description,
                    values: serde_json::from_str(&values)?,
                })
            })
            .collect()
    }

    /// Insert or replace `items` in a single transaction.
    pub fn add_quick_decisions(&mut self, items: &[QuickDecision]) -> RaffleResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO quick_decision (id, locale, description, value_list)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for item in items {
                stmt.execute(params![
                    &item.id,
                    &item.locale,
                    &item.description,
                    serde_json::to_string(&item.values)?,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Returns true if a row was removed.
    pub fn delete_quick_decision(&self, id: &str) -> RaffleResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM quick_decision WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}
