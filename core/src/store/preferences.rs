use super::RafflerStore;
use crate::{
    error::{RaffleError, RaffleResult},
    preferences::{Preferences, PREFERENCES_ID},
    types::{AppLanguage, AppTheme, RaffleMode},
};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;

impl RafflerStore {
    // ── Preferences ───────────────────────────────────────────────

    pub fn preferences(&self) -> RaffleResult<Option<Preferences>> {
        read_preferences(&self.conn)
    }

    pub fn set_preferences(&self, prefs: &Preferences) -> RaffleResult<()> {
        write_preferences(&self.conn, prefs)
    }

    /// Insert `defaults` unless a preferences row already exists.
    /// Returns true when the row was created.
    pub fn insert_preferences_if_absent(&self, defaults: &Preferences) -> RaffleResult<bool> {
        let hints = serde_json::to_string(&defaults.hints_displayed)?;
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO preferences (
                id, app_theme, app_language,
                lottery_default_quantity_available, lottery_default_quantity_to_raffle,
                preferred_raffle_mode, roulette_music_enabled, remember_raffled_items,
                hints_displayed
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                PREFERENCES_ID,
                defaults.app_theme.as_str(),
                defaults.app_language.as_str(),
                &defaults.lottery_default_quantity_available,
                &defaults.lottery_default_quantity_to_raffle,
                defaults.preferred_raffle_mode.as_str(),
                defaults.roulette_music_enabled,
                defaults.remember_raffled_items,
                hints,
            ],
        )?;
        Ok(inserted > 0)
    }

    /// Read the current row, apply `mutate`, write it back. All in one
    /// transaction: if the row is missing nothing is written.
    pub fn update_preferences<F>(&mut self, mutate: F) -> RaffleResult<Preferences>
    where
        F: FnOnce(&mut Preferences),
    {
        let tx = self.conn.transaction()?;
        let mut prefs = read_preferences(&tx)?.ok_or_else(|| RaffleError::not_found("preferences"))?;
        mutate(&mut prefs);
        write_preferences(&tx, &prefs)?;
        tx.commit()?;
        Ok(prefs)
    }
}

fn read_preferences(conn: &Connection) -> RaffleResult<Option<Preferences>> {
    let row = conn
        .query_row(
            "SELECT id, app_theme, app_language,
                    lottery_default_quantity_available, lottery_default_quantity_to_raffle,
                    preferred_raffle_mode, roulette_music_enabled, remember_raffled_items,
                    hints_displayed
             FROM preferences WHERE id = ?1",
            params![PREFERENCES_ID],
            |row| {
                Ok((
                    Preferences {
                        id: row.get(0)?,
                        app_theme: AppTheme::parse(&row.get::<_, String>(1)?),
                        app_language: AppLanguage::parse(&row.get::<_, String>(2)?),
                        lottery_default_quantity_available: row.get(3)?,
                        lottery_default_quantity_to_raffle: row.get(4)?,
                        preferred_raffle_mode: RaffleMode::parse(&row.get::<_, String>(5)?),
                        roulette_music_enabled: row.get(6)?,
                        remember_raffled_items: row.get(7)?,
                        hints_displayed: BTreeMap::new(),
                    },
                    row.get::<_, String>(8)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((mut prefs, hints_json)) => {
            prefs.hints_displayed = serde_json::from_str(&hints_json)?;
            Ok(Some(prefs))
        }
        None => Ok(None),
    }
}

fn write_preferences(conn: &Connection, prefs: &Preferences) -> RaffleResult<()> {
    let hints = serde_json::to_string(&prefs.hints_displayed)?;
    conn.execute(
        "INSERT OR REPLACE INTO preferences (
            id, app_theme, app_language,
            lottery_default_quantity_available, lottery_default_quantity_to_raffle,
            preferred_raffle_mode, roulette_music_enabled, remember_raffled_items,
            hints_displayed
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            PREFERENCES_ID,
            prefs.app_theme.as_str(),
            prefs.app_language.as_str(),
            &prefs.lottery_default_quantity_available,
            &prefs.lottery_default_quantity_to_raffle,
            prefs.preferred_raffle_mode.as_str(),
            prefs.roulette_music_enabled,
            prefs.remember_raffled_items,
            hints,
        ],
    )?;
    Ok(())
}
