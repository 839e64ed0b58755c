//! Application configuration management.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::AppError;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Billing configuration.
    #[serde(default)]
    pub billing: BillingConfig,
    /// Export configuration.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Billing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// IANA time zone used to resolve "today" for open-ended requests.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Days between an invoice's transaction date and its due date.
    #[serde(default = "default_invoice_due_days")]
    pub invoice_due_days: u32,
    /// Monthly radio rental charged to couriers at month end.
    #[serde(default = "default_radio_rental_fee")]
    pub radio_rental_fee: Decimal,
    /// Number of import rows resolved per batch.
    #[serde(default = "default_import_batch_size")]
    pub import_batch_size: usize,
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_invoice_due_days() -> u32 {
    15
}

fn default_radio_rental_fee() -> Decimal {
    Decimal::new(3000, 2) // 30.00
}

fn default_import_batch_size() -> usize {
    100
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            invoice_due_days: default_invoice_due_days(),
            radio_rental_fee: default_radio_rental_fee(),
            import_batch_size: default_import_batch_size(),
        }
    }
}

impl BillingConfig {
    /// Parses the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the name is not a known IANA zone.
    pub fn time_zone(&self) -> Result<Tz, AppError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::Config(format!("Unknown time zone: {}", self.timezone)))
    }
}

/// Export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory generated CSV files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_output_dir() -> String {
    "exports".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(None)
    }

    /// Loads configuration, layering an explicit file over the default sources.
    ///
    /// Order: `config/default`, `config/{RUN_MODE}`, the explicit file, then
    /// `DISPATCH__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or a value has the wrong type.
    pub fn load_from(path: Option<&str>) -> Result<Self, AppError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let config = builder
            .add_source(config::Environment::with_prefix("DISPATCH").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_without_sources() {
        let config = temp_env::with_vars_unset(
            [
                "DISPATCH__BILLING__RADIO_RENTAL_FEE",
                "DISPATCH__BILLING__TIMEZONE",
                "DISPATCH__EXPORT__OUTPUT_DIR",
            ],
            AppConfig::load,
        )
        .unwrap();

        assert_eq!(config.billing.timezone, "America/New_York");
        assert_eq!(config.billing.invoice_due_days, 15);
        assert_eq!(config.billing.radio_rental_fee, dec!(30.00));
        assert_eq!(config.billing.import_batch_size, 100);
        assert_eq!(config.export.output_dir, "exports");
    }

    #[test]
    fn test_environment_overrides() {
        let config = temp_env::with_vars(
            [
                ("DISPATCH__BILLING__RADIO_RENTAL_FEE", Some("45.50")),
                ("DISPATCH__BILLING__INVOICE_DUE_DAYS", Some("30")),
                ("DISPATCH__EXPORT__OUTPUT_DIR", Some("/tmp/dispatch")),
            ],
            AppConfig::load,
        )
        .unwrap();

        assert_eq!(config.billing.radio_rental_fee, dec!(45.50));
        assert_eq!(config.billing.invoice_due_days, 30);
        assert_eq!(config.export.output_dir, "/tmp/dispatch");
    }

    #[test]
    fn test_time_zone_parsing() {
        let billing = BillingConfig::default();
        assert_eq!(billing.time_zone().unwrap(), chrono_tz::America::New_York);

        let bad = BillingConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..BillingConfig::default()
        };
        assert!(matches!(bad.time_zone(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = AppConfig::load_from(Some("does/not/exist/dispatch"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
