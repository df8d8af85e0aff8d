use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Reads an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A park managed by the department. Parks exist before any program references them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Park {
    pub id: i64,
    pub park_name: String,
    pub abbreviation: String,
}

/// Request for creating or updating a park
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkRequest {
    pub park_name: String,
    pub abbreviation: String,
}

/// A park as nested inside a program response.
///
/// Each nested park repeats every schedule it shares with the program's other
/// parks, so the same schedule id can appear under several parks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkWithSchedules {
    pub id: i64,
    pub park_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub abbreviation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedules: Vec<Schedule>,
}

impl ParkWithSchedules {
    pub fn as_park(&self) -> Park {
        Park {
            id: self.id,
            park_name: self.park_name.clone(),
            abbreviation: self.abbreviation.clone(),
        }
    }
}

/// An administrative offering run in one or more parks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parks: Vec<ParkWithSchedules>,
    /// Server-derived; never computed or sent by the client
    #[serde(default)]
    pub total_capacity: Option<u32>,
    /// Server-derived occupancy across all schedules
    #[serde(default)]
    pub current_capacity: Option<u32>,
}

impl Program {
    /// Program-level capacity limit as reported by the backend (missing reads as 0)
    pub fn capacity_limit(&self) -> u32 {
        self.total_capacity.unwrap_or(0)
    }

    pub fn occupied(&self) -> u32 {
        self.current_capacity.unwrap_or(0)
    }

    pub fn has_park(&self, park_id: i64) -> bool {
        self.parks.iter().any(|p| p.id == park_id)
    }

    pub fn park_ids(&self) -> Vec<i64> {
        self.parks.iter().map(|p| p.id).collect()
    }

    pub fn park_name(&self, park_id: i64) -> Option<&str> {
        self.parks
            .iter()
            .find(|p| p.id == park_id)
            .map(|p| p.park_name.as_str())
    }
}

/// Request for creating or updating a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRequest {
    pub name: String,
    pub park_ids: Vec<i64>,
}

/// A recurring weekly time slot attached to one program and a subset of its parks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub park_ids: Vec<i64>,
    /// Canonically ordered weekday names joined by ", "
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub current_capacity: Option<u32>,
    #[serde(default)]
    pub career: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Schedule {
    pub fn capacity_or_zero(&self) -> u32 {
        self.capacity.unwrap_or(0)
    }

    pub fn occupied(&self) -> u32 {
        self.current_capacity.unwrap_or(0)
    }

    /// Whether another social server can still be enrolled
    pub fn has_vacancy(&self) -> bool {
        self.occupied() < self.capacity_or_zero()
    }

    pub fn covers_park(&self, park_id: i64) -> bool {
        self.park_ids.contains(&park_id)
    }
}

/// Payload for creating or updating a schedule under a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub park_ids: Vec<i64>,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    pub capacity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Names of the social servers detached by a program or schedule deletion
pub type AffectedServers = Vec<String>;

/// A volunteer or intern enrolled into a specific schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialServer {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub park_id: Option<i64>,
    pub park_name: Option<String>,
    pub school: Option<String>,
    pub program_id: Option<i64>,
    pub program: Option<String>,
    pub schedule_id: Option<i64>,
    pub days: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub total_hours_required: Option<u32>,
    pub enrollment_date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub photo_path: Option<String>,
    pub badge: Option<bool>,
    pub vest: Option<u32>,
    pub tutor_name: Option<String>,
    pub tutor_phone: Option<String>,
    pub cell_phone: Option<String>,
    pub blood_type: Option<String>,
    pub allergy: Option<String>,
    pub birth_date: Option<String>,
    pub major: Option<String>,
    pub period_id: Option<i64>,
    pub social_server_type: Option<String>,
}

/// Request for creating or updating a social server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialServerRequest {
    pub email: String,
    pub name: String,
    pub park_id: i64,
    pub school: String,
    pub schedule_id: i64,
    pub total_hours: u32,
    pub badge: bool,
    pub vest: u32,
    pub birth_date: String, // ISO 8601 date format (YYYY-MM-DD)
    pub social_server_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tutor_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Console user role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::SuperAdmin => "Super Administrador",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "SUPER_ADMIN" => Some(Role::SuperAdmin),
            _ => None,
        }
    }
}

/// An administrative console user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub registration_date: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub message: Option<String>,
}

/// Authenticated operator as persisted between page loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Session {
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            email: response.email,
            name: response.name,
            role: response.role,
        }
    }
}

/// Direction of an attendance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceType {
    CheckIn,
    CheckOut,
}

impl AttendanceType {
    pub const ALL: [AttendanceType; 2] = [AttendanceType::CheckIn, AttendanceType::CheckOut];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceType::CheckIn => "CHECK_IN",
            AttendanceType::CheckOut => "CHECK_OUT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceType::CheckIn => "Entrada",
            AttendanceType::CheckOut => "Salida",
        }
    }

    pub fn parse(value: &str) -> Option<AttendanceType> {
        match value {
            "CHECK_IN" => Some(AttendanceType::CheckIn),
            "CHECK_OUT" => Some(AttendanceType::CheckOut),
            _ => None,
        }
    }
}

impl fmt::Display for AttendanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recorded check-in or check-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: i64,
    #[serde(default)]
    pub social_server_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub social_server_name: String,
    #[serde(default, alias = "email")]
    pub social_server_email: Option<String>,
    #[serde(default)]
    pub park_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub park_name: String,
    /// Local date-time as produced by the backend (ISO 8601, no offset)
    pub timestamp: String,
    #[serde(rename = "type")]
    pub attendance_type: AttendanceType,
    #[serde(default)]
    pub photo_path: Option<String>,
}

/// Fields of a check-in/check-out submission; the photo travels alongside as a file part
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSubmission {
    pub folio: i64,
    pub park_id: i64,
    pub attendance_type: AttendanceType,
    pub location: Option<GeoPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReceipt {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the backend on a rejected request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// The most specific human-readable message in the body
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or(self.error.filter(|e| !e.trim().is_empty()))
    }
}

/// Maximum accepted attendance photo size, in kilobytes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotoSizeLimit {
    pub value: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_deserializes_nested_parks() {
        let json = r#"{
            "id": 7,
            "name": "Reciclaje",
            "parks": [
                {"id": 1, "parkName": "Parque Norte", "abbreviation": "PN", "schedules": [
                    {"id": 10, "parkIds": [1, 2], "days": "Lunes, Martes", "startTime": "09:00", "endTime": "13:00", "capacity": 5, "currentCapacity": 2}
                ]},
                {"id": 2, "parkName": "Parque Sur", "abbreviation": "PS"}
            ],
            "totalCapacity": 10,
            "currentCapacity": null
        }"#;

        let program: Program = serde_json::from_str(json).unwrap();
        assert_eq!(program.parks.len(), 2);
        assert_eq!(program.capacity_limit(), 10);
        assert_eq!(program.occupied(), 0);
        assert!(program.parks[1].schedules.is_empty());

        let schedule = &program.parks[0].schedules[0];
        assert_eq!(schedule.park_ids, vec![1, 2]);
        assert_eq!(schedule.career, None);
        assert!(schedule.has_vacancy());
        assert_eq!(program.park_name(2), Some("Parque Sur"));
    }

    #[test]
    fn test_schedule_without_park_ids_reads_as_empty() {
        let json = r#"{"id": 3, "days": "Lunes", "startTime": "08:00:00", "endTime": "10:00:00", "capacity": null}"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert!(schedule.park_ids.is_empty());
        assert_eq!(schedule.capacity_or_zero(), 0);
        assert!(!schedule.has_vacancy());
    }

    #[test]
    fn test_explicit_nulls_read_as_empty() {
        let json = r#"[{
            "id": 4,
            "name": "Huertos",
            "parks": [
                {"id": 1, "parkName": "Parque Norte", "abbreviation": null, "schedules": [
                    {"id": 11, "parkIds": null, "days": "Sábado", "startTime": "09:00", "endTime": "12:00", "capacity": 3}
                ]},
                {"id": 2, "parkName": "Parque Sur", "schedules": null}
            ],
            "totalCapacity": 3
        }, {"id": 5, "name": "Sin parques", "parks": null}]"#;

        let programs: Vec<Program> = serde_json::from_str(json).unwrap();
        assert_eq!(programs.len(), 2);
        assert!(programs[0].parks[0].schedules[0].park_ids.is_empty());
        assert_eq!(programs[0].parks[0].abbreviation, "");
        assert!(programs[0].parks[1].schedules.is_empty());
        assert!(programs[1].parks.is_empty());

        let attendance: Attendance = serde_json::from_str(
            r#"{"id": 2, "socialServerName": null, "parkName": null, "timestamp": "2025-03-01T08:15:00", "type": "CHECK_IN"}"#,
        )
        .unwrap();
        assert_eq!(attendance.social_server_name, "");
        assert_eq!(attendance.park_name, "");

        let server: SocialServer = serde_json::from_str(r#"{"id": 9, "email": null, "name": null}"#).unwrap();
        assert_eq!(server.email, "");
        assert_eq!(server.name, "");
    }

    #[test]
    fn test_schedule_request_omits_empty_optionals() {
        let request = ScheduleRequest {
            park_ids: vec![1],
            days: "Lunes".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            capacity: 4,
            career: None,
            notes: Some("Traer gorra".to_string()),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["parkIds"], serde_json::json!([1]));
        assert_eq!(value["startTime"], "09:00");
        assert!(value.get("career").is_none());
        assert_eq!(value["notes"], "Traer gorra");
    }

    #[test]
    fn test_attendance_wire_format() {
        let json = r#"{"id": 1, "socialServerName": "Ana", "email": "ana@example.com", "parkName": "Parque Norte", "timestamp": "2025-03-01T08:15:00", "type": "CHECK_OUT"}"#;
        let attendance: Attendance = serde_json::from_str(json).unwrap();
        assert_eq!(attendance.attendance_type, AttendanceType::CheckOut);
        assert_eq!(attendance.social_server_email.as_deref(), Some("ana@example.com"));
        assert_eq!(attendance.attendance_type.to_string(), "Salida");
    }

    #[test]
    fn test_api_error_body_prefers_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message": "El horario no pertenece al programa especificado", "error": "Bad Request"}"#).unwrap();
        assert_eq!(
            body.into_message().as_deref(),
            Some("El horario no pertenece al programa especificado")
        );

        let body: ApiErrorBody = serde_json::from_str(r#"{"message": "", "error": "Forbidden"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Forbidden"));
    }

    #[test]
    fn test_role_round_trip_names() {
        for role in [Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("GUEST"), None);

        let response: LoginResponse = serde_json::from_str(
            r#"{"token": "abc", "email": "a@b.mx", "name": "Admin", "role": "SUPER_ADMIN"}"#,
        )
        .unwrap();
        let session = Session::from(response);
        assert!(session.is_super_admin());
    }
}
