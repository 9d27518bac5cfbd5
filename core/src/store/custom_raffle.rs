use super::RafflerStore;
use crate::{
    custom_raffle::{CustomRaffle, CustomRaffleItem},
    error::RaffleResult,
    types::RaffleId,
};
use rusqlite::{params, Connection, OptionalExtension};

impl RafflerStore {
    // ── Custom raffles ────────────────────────────────────────────

    pub fn all_custom_raffles(&self) -> RaffleResult<Vec<CustomRaffle>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, description FROM custom_raffle ORDER BY id ASC")?;
        let heads = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        heads
            .into_iter()
            .map(|(id, description)| {
                Ok(CustomRaffle {
                    id,
                    description,
                    items: items_for(&self.conn, id)?,
                })
            })
            .collect()
    }

    pub fn custom_raffle_by_id(&self, id: RaffleId) -> RaffleResult<Option<CustomRaffle>> {
        let description = self
            .conn
            .query_row(
                "SELECT description FROM custom_raffle WHERE id = ?1",
                params![id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match description {
            Some(description) => Ok(Some(CustomRaffle {
                id,
                description,
                items: items_for(&self.conn, id)?,
            })),
            None => Ok(None),
        }
    }

    /// Insert (id == 0) or replace a raffle and its items in one transaction.
    /// Returns the raffle id.
    pub fn save_custom_raffle(&mut self, raffle: &CustomRaffle) -> RaffleResult<RaffleId> {
        let tx = self.conn.transaction()?;

        let id = if raffle.id == 0 {
            tx.execute(
                "INSERT INTO custom_raffle (description) VALUES (?1)",
                params![&raffle.description],
            )?;
            tx.last_insert_rowid()
        } else {
            tx.execute(
                "INSERT INTO custom_raffle (id, description) VALUES (?1, ?2)
                 ON CONFLICT (id) DO UPDATE SET description = excluded.description",
                params![raffle.id, &raffle.description],
            )?;
            tx.execute(
                "DELETE FROM custom_raffle_item WHERE raffle_id = ?1",
                params![raffle.id],
            )?;
            raffle.id
        };

        {
            let mut stmt = tx.prepare(
                "INSERT INTO custom_raffle_item (id, raffle_id, position, description, included)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, item) in raffle.items.iter().enumerate() {
                let item_id = (item.id != 0).then_some(item.id);
                stmt.execute(params![
                    item_id,
                    id,
                    position as i64,
                    &item.description,
                    item.included,
                ])?;
            }
        }

        tx.commit()?;
        Ok(id)
    }

    /// Returns true if a raffle was removed. Items cascade.
    pub fn delete_custom_raffle(&self, id: RaffleId) -> RaffleResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM custom_raffle WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    /// Returns true if the item exists in that raffle.
    pub fn set_item_included(
        &self,
        raffle_id: RaffleId,
        item_id: i64,
        included: bool,
    ) -> RaffleResult<bool> {
        let updated = self.conn.execute(
            "UPDATE custom_raffle_item SET included = ?1
             WHERE raffle_id = ?2 AND id = ?3",
            params![included, raffle_id, item_id],
        )?;
        Ok(updated > 0)
    }

    pub fn include_all_items(&self, raffle_id: RaffleId) -> RaffleResult<()> {
        self.conn.execute(
            "UPDATE custom_raffle_item SET included = 1 WHERE raffle_id = ?1",
            params![raffle_id],
        )?;
        Ok(())
    }
}

fn items_for(conn: &Connection, raffle_id: RaffleId) -> RaffleResult<Vec<CustomRaffleItem>> {
    let mut stmt = conn.prepare(
        "SELECT id, description, included FROM custom_raffle_item
         WHERE raffle_id = ?1 ORDER BY position ASC",
    )?;
    let items = stmt
        .query_map(params![raffle_id], |row| {
            Ok(CustomRaffleItem {
                id: row.get(0)?,
                description: row.get(1)?,
                included: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}
