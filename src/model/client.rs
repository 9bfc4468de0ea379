use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "nombre": "Construcciones SA",
        "razon_social": "Construcciones SA",
        "ruc_dni": "20123456789",
        "telefono": "+54 9 11 1234-5678",
        "email": "contacto@construcciones.com",
        "direccion": "Av. Principal 123",
        "created_at": "2024-01-01T09:00:00"
    })
)]
pub struct Client {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "razon_social")]
    pub legal_name: Option<String>,
    #[serde(rename = "ruc_dni")]
    pub tax_id: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<NaiveDateTime>,
}

/// Body of create and update requests; updates resupply every field.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ClientPayload {
    #[serde(rename = "nombre")]
    #[schema(example = "Construcciones SA")]
    pub name: Option<String>,
    #[serde(rename = "razon_social")]
    pub legal_name: Option<String>,
    #[serde(rename = "ruc_dni")]
    pub tax_id: Option<String>,
    #[serde(rename = "telefono")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
}
