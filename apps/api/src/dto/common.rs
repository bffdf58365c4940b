use atelier_core::Locale;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "api-types/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Locale selector for locale-scoped endpoints; English when absent.
#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    pub locale: Locale,
}
