use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Site leader (encargado).
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Leader {
    #[schema(example = 1)]
    pub id: i64,
    #[serde(rename = "nombre")]
    #[schema(example = "Juan")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    #[schema(example = "Pérez")]
    pub last_name: String,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LeaderPayload {
    #[serde(rename = "nombre")]
    #[schema(example = "Juan")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido")]
    #[schema(example = "Pérez")]
    pub last_name: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    pub email: Option<String>,
}
