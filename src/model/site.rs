use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Construction site (obra) with its client and leader display names.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Site {
    #[schema(example = 1)]
    pub id: i64,
    #[serde(rename = "nombre")]
    #[schema(example = "Edificio Central")]
    pub name: String,
    #[serde(rename = "cliente_id")]
    pub client_id: Option<i64>,
    #[serde(rename = "lider_id")]
    pub leader_id: Option<i64>,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[serde(rename = "fecha_inicio")]
    #[schema(value_type = Option<String>, format = "date")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fecha_fin")]
    #[schema(value_type = Option<String>, format = "date")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "estado")]
    #[schema(example = "active")]
    pub status: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: Option<NaiveDateTime>,

    #[serde(rename = "cliente_nombre")]
    #[schema(example = "Construcciones SA")]
    pub client_name: Option<String>,
    #[serde(rename = "lider_nombre")]
    #[schema(example = "Juan Pérez")]
    pub leader_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SitePayload {
    #[serde(rename = "nombre")]
    #[schema(example = "Edificio Central")]
    pub name: Option<String>,
    #[serde(rename = "cliente_id")]
    pub client_id: Option<i64>,
    #[serde(rename = "lider_id")]
    pub leader_id: Option<i64>,
    #[serde(rename = "direccion")]
    pub address: Option<String>,
    #[serde(rename = "fecha_inicio")]
    #[schema(value_type = Option<String>, format = "date")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "fecha_fin")]
    #[schema(value_type = Option<String>, format = "date")]
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "estado")]
    pub status: Option<String>,
    /// Employees assigned to the site; replaces the current assignment set.
    /// Absent or `null` clears it.
    #[serde(rename = "empleados_ids", default, deserialize_with = "null_as_empty")]
    #[schema(example = json!([1, 2, 3]))]
    pub employee_ids: Vec<i64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<i64>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_or_missing_employee_ids_mean_no_assignments() {
        let null: SitePayload =
            serde_json::from_value(json!({ "nombre": "Torre", "empleados_ids": null })).unwrap();
        let missing: SitePayload = serde_json::from_value(json!({ "nombre": "Torre" })).unwrap();
        let listed: SitePayload =
            serde_json::from_value(json!({ "nombre": "Torre", "empleados_ids": [3, 1] })).unwrap();

        assert!(null.employee_ids.is_empty());
        assert!(missing.employee_ids.is_empty());
        assert_eq!(listed.employee_ids, vec![3, 1]);
    }
}
