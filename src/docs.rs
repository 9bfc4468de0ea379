use crate::model::attendance::{
    AttendanceEntry, AttendanceInput, Conflict, RegisterAttendance, RegisteredAttendance,
};
use crate::model::backup::BackupFile;
use crate::model::client::{Client, ClientPayload};
use crate::model::employee::{Employee, EmployeePayload};
use crate::model::leader::{Leader, LeaderPayload};
use crate::model::site::{Site, SitePayload};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Obras Asistencia API",
        version = "1.0.0",
        description = r#"
## Construction site attendance

Administrative backend for tracking daily worker attendance across construction sites.

### Key Features
- **Clients, leaders, employees and sites**
  - Create, update, list and delete; sites carry their assigned employees
- **Attendance**
  - Register a site's day in one call; an employee can be present at only one site per date
  - Filter history by date range, client, site, employee or leader
- **Backups**
  - Daily snapshots with retention, listed and downloaded behind a shared PIN

### Response Format
- JSON bodies; errors carry `error` (kind) and `message`
- Scheduling conflicts return 409 with `conflictos`
"#,
    ),
    paths(
        crate::api::client::list_clients,
        crate::api::client::get_client,
        crate::api::client::create_client,
        crate::api::client::update_client,
        crate::api::client::delete_client,

        crate::api::leader::list_leaders,
        crate::api::leader::get_leader,
        crate::api::leader::create_leader,
        crate::api::leader::update_leader,
        crate::api::leader::delete_leader,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::site::list_sites,
        crate::api::site::get_site,
        crate::api::site::create_site,
        crate::api::site::update_site,
        crate::api::site::delete_site,
        crate::api::site::list_site_employees,
        crate::api::site::list_site_assignments,

        crate::api::attendance::register_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::verify_attendance,

        crate::api::backup::list_backups,
        crate::api::backup::download_backup
    ),
    components(
        schemas(
            Client,
            ClientPayload,
            Leader,
            LeaderPayload,
            Employee,
            EmployeePayload,
            Site,
            SitePayload,
            AttendanceEntry,
            AttendanceInput,
            RegisterAttendance,
            RegisteredAttendance,
            Conflict,
            BackupFile
        )
    ),
    tags(
        (name = "Clientes", description = "Client management APIs"),
        (name = "Lideres", description = "Site leader management APIs"),
        (name = "Empleados", description = "Employee management APIs"),
        (name = "Obras", description = "Site and assignment management APIs"),
        (name = "Asistencias", description = "Attendance registration and queries"),
        (name = "Backup", description = "PIN-gated backup retrieval"),
    )
)]
pub struct ApiDoc;
