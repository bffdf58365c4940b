use std::str::FromStr;

use atelier_core::AppError;
use atelier_domain::InstanceStatus;
use serde::Deserialize;
use serde_json::{Map, Value};
use ts_rs::TS;

/// Incoming payload for placing one instance on a page.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "api-types/create-instance-request.ts"
)]
pub struct CreateInstanceRequest {
    pub blueprint_id: String,
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Incoming payload for editing one locale of an instance.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "api-types/update-instance-request.ts"
)]
pub struct UpdateInstanceRequest {
    #[serde(default)]
    #[ts(type = "Record<string, unknown> | null")]
    pub data: Option<Map<String, Value>>,
    #[serde(default)]
    pub status: Option<String>,
}

pub fn parse_status(status: Option<&str>) -> Result<Option<InstanceStatus>, AppError> {
    status.map(InstanceStatus::from_str).transpose()
}
