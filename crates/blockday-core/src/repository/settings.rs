use crate::error::CoreError;
use crate::repository::SqliteRepository;
use crate::settings::CalendarSettings;
use async_trait::async_trait;
use chrono::Utc;

const SETTINGS_KEY: &str = "calendar";

#[async_trait]
impl super::SettingsRepository for SqliteRepository {
    async fn load_settings(&self) -> Result<CalendarSettings, CoreError> {
        let stored: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
            .bind(SETTINGS_KEY)
            .fetch_optional(self.pool())
            .await?;

        let Some(json) = stored else {
            return Ok(CalendarSettings::default());
        };

        let settings = match serde_json::from_str::<CalendarSettings>(&json) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "stored settings are unreadable, using defaults");
                return Ok(CalendarSettings::default());
            }
        };

        if let Err(e) = settings.validate() {
            tracing::warn!(error = %e, "stored settings are invalid, using defaults");
            return Ok(CalendarSettings::default());
        }
        Ok(settings)
    }

    async fn save_settings(&self, settings: &CalendarSettings) -> Result<(), CoreError> {
        settings.validate()?;
        let json = serde_json::to_string(settings)?;

        sqlx::query(
            r#"INSERT INTO settings (key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(SETTINGS_KEY)
        .bind(json)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        tracing::debug!("saved settings");
        Ok(())
    }

    async fn reset_settings(&self) -> Result<CalendarSettings, CoreError> {
        sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(SETTINGS_KEY)
            .execute(self.pool())
            .await?;
        Ok(CalendarSettings::default())
    }
}
