//! Raw form state and the checks that gate submission.
//!
//! Drafts hold exactly what the operator typed. `validate` turns a draft into
//! the request payload, or reports the first input error, without touching
//! the draft so the form can be corrected and resubmitted.

use chrono::NaiveDate;

use crate::capacity::{validate_schedule_capacity, CapacityError};
use crate::days::DaySelection;
use crate::models::{
    AttendanceSubmission, AttendanceType, CreateUserRequest, GeoPoint, ParkRequest, Program,
    ProgramRequest, Role, Schedule, ScheduleRequest, SocialServer, SocialServerRequest,
};
use crate::time::{short_time, TimeOfDay, DEFAULT_END_TIME, DEFAULT_START_TIME};

pub const MAX_PARK_NAME_LENGTH: usize = 255;
pub const MAX_ABBREVIATION_LENGTH: usize = 50;
pub const MAX_SCHOOL_LENGTH: usize = 100;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_TOTAL_HOURS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("El campo '{0}' es obligatorio")]
    Required(&'static str),
    #[error("El campo '{field}' no puede exceder {max} caracteres")]
    TooLong { field: &'static str, max: usize },
    #[error("Debe seleccionar al menos un parque")]
    NoParksSelected,
    #[error("Debe seleccionar al menos un día")]
    NoDaysSelected,
    #[error("{0}")]
    InvalidTime(#[from] crate::time::TimeParseError),
    #[error("La hora de fin debe ser posterior a la hora de inicio")]
    EndNotAfterStart,
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    #[error("El correo electrónico no tiene un formato válido")]
    InvalidEmail,
    #[error("La contraseña debe tener al menos 8 caracteres")]
    PasswordTooShort,
    #[error("El folio debe ser un número mayor a 0")]
    InvalidFolio,
    #[error("Debe adjuntar una foto como evidencia")]
    MissingPhoto,
    #[error("Las horas totales deben estar entre 1 y 10000")]
    InvalidTotalHours,
    #[error("El campo '{0}' debe ser un número válido")]
    InvalidNumber(&'static str),
    #[error("La fecha '{0}' no es válida (AAAA-MM-DD)")]
    InvalidDate(String),
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(trimmed.to_string())
}

fn bounded(value: &str, field: &'static str, max: usize) -> Result<String, FormError> {
    let value = required(value, field)?;
    if value.chars().count() > max {
        return Err(FormError::TooLong { field, max });
    }
    Ok(value)
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn valid_email(value: &str) -> Result<String, FormError> {
    let value = required(value, "correo electrónico")?;
    match value.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace) =>
        {
            Ok(value)
        }
        _ => Err(FormError::InvalidEmail),
    }
}

fn valid_date(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = required(value, field)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map(|_| value.clone())
        .map_err(|_| FormError::InvalidDate(value))
}

fn optional_date(value: &str) -> Result<Option<String>, FormError> {
    match optional(value) {
        Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map(|_| Some(date.clone()))
            .map_err(|_| FormError::InvalidDate(date)),
        None => Ok(None),
    }
}

/// Schedule form state
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDraft {
    pub park_ids: Vec<i64>,
    pub days: String,
    pub start_time: String,
    pub end_time: String,
    pub capacity: String,
    pub career: String,
    pub notes: String,
}

impl Default for ScheduleDraft {
    fn default() -> Self {
        Self {
            park_ids: Vec::new(),
            days: String::new(),
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            capacity: String::new(),
            career: String::new(),
            notes: String::new(),
        }
    }
}

impl ScheduleDraft {
    /// Prefill the form from an existing schedule for editing
    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            park_ids: schedule.park_ids.clone(),
            days: DaySelection::parse(&schedule.days).to_days_string(),
            start_time: short_time(&schedule.start_time),
            end_time: short_time(&schedule.end_time),
            capacity: schedule
                .capacity
                .map(|c| c.to_string())
                .unwrap_or_default(),
            career: schedule.career.clone().unwrap_or_default(),
            notes: schedule.notes.clone().unwrap_or_default(),
        }
    }

    pub fn toggle_park(&mut self, park_id: i64) {
        if let Some(pos) = self.park_ids.iter().position(|id| *id == park_id) {
            self.park_ids.remove(pos);
        } else {
            self.park_ids.push(park_id);
        }
    }

    /// Check the draft against its owning program. `editing` is the id of the
    /// schedule being replaced, if any.
    pub fn validate(&self, program: &Program, editing: Option<i64>) -> Result<ScheduleRequest, FormError> {
        if self.park_ids.is_empty() {
            return Err(FormError::NoParksSelected);
        }

        let days = DaySelection::parse(&self.days);
        if days.is_empty() {
            return Err(FormError::NoDaysSelected);
        }

        let start: TimeOfDay = self.start_time.parse()?;
        let end: TimeOfDay = self.end_time.parse()?;
        if end <= start {
            return Err(FormError::EndNotAfterStart);
        }

        let capacity = validate_schedule_capacity(program, &self.capacity, &self.park_ids, editing)?;

        let mut park_ids = self.park_ids.clone();
        park_ids.sort_unstable();
        park_ids.dedup();

        Ok(ScheduleRequest {
            park_ids,
            days: days.to_days_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
            capacity,
            career: optional(&self.career),
            notes: optional(&self.notes),
        })
    }
}

/// Program form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramDraft {
    pub name: String,
    pub park_ids: Vec<i64>,
}

impl ProgramDraft {
    pub fn from_program(program: &Program) -> Self {
        Self {
            name: program.name.clone(),
            park_ids: program.park_ids(),
        }
    }

    pub fn toggle_park(&mut self, park_id: i64) {
        if let Some(pos) = self.park_ids.iter().position(|id| *id == park_id) {
            self.park_ids.remove(pos);
        } else {
            self.park_ids.push(park_id);
        }
    }

    pub fn validate(&self) -> Result<ProgramRequest, FormError> {
        let name = required(&self.name, "nombre")?;
        if self.park_ids.is_empty() {
            return Err(FormError::NoParksSelected);
        }
        Ok(ProgramRequest {
            name,
            park_ids: self.park_ids.clone(),
        })
    }
}

/// Park form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParkDraft {
    pub park_name: String,
    pub abbreviation: String,
}

impl ParkDraft {
    pub fn validate(&self) -> Result<ParkRequest, FormError> {
        Ok(ParkRequest {
            park_name: bounded(&self.park_name, "nombre del parque", MAX_PARK_NAME_LENGTH)?,
            abbreviation: bounded(&self.abbreviation, "abreviatura", MAX_ABBREVIATION_LENGTH)?,
        })
    }
}

/// Console user form state
#[derive(Debug, Clone, PartialEq)]
pub struct UserDraft {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            email: String::new(),
            name: String::new(),
            password: String::new(),
            role: Role::Admin,
        }
    }
}

impl UserDraft {
    pub fn validate(&self) -> Result<CreateUserRequest, FormError> {
        let name = required(&self.name, "nombre")?;
        let email = valid_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(FormError::PasswordTooShort);
        }
        Ok(CreateUserRequest {
            email,
            name,
            password: self.password.clone(),
            role: self.role,
        })
    }
}

/// Check-in/check-out form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceDraft {
    pub folio: String,
    pub park_id: Option<i64>,
    pub attendance_type: Option<AttendanceType>,
    pub has_photo: bool,
    pub location: Option<GeoPoint>,
}

impl AttendanceDraft {
    pub fn validate(&self) -> Result<AttendanceSubmission, FormError> {
        let folio = match self.folio.trim().parse::<i64>() {
            Ok(value) if value > 0 => value,
            _ if self.folio.trim().is_empty() => return Err(FormError::Required("folio")),
            _ => return Err(FormError::InvalidFolio),
        };
        let park_id = self.park_id.ok_or(FormError::Required("parque"))?;
        let attendance_type = self
            .attendance_type
            .ok_or(FormError::Required("tipo de registro"))?;
        if !self.has_photo {
            return Err(FormError::MissingPhoto);
        }
        Ok(AttendanceSubmission {
            folio,
            park_id,
            attendance_type,
            location: self.location,
        })
    }
}

/// Social server form state
#[derive(Debug, Clone, PartialEq)]
pub struct SocialServerDraft {
    pub email: String,
    pub name: String,
    pub school: String,
    pub program_id: Option<i64>,
    pub park_id: Option<i64>,
    pub schedule_id: Option<i64>,
    pub total_hours: String,
    pub badge: bool,
    pub vest: String,
    pub birth_date: String,
    pub social_server_type: String,
    pub major: String,
    pub cell_phone: String,
    pub blood_type: String,
    pub allergy: String,
    pub tutor_name: String,
    pub tutor_phone: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

pub const SOCIAL_SERVER_TYPES: [&str; 3] = ["SERVICIO_SOCIAL", "PRACTICAS_PROFESIONALES", "VOLUNTARIADO"];

impl Default for SocialServerDraft {
    fn default() -> Self {
        Self {
            email: String::new(),
            name: String::new(),
            school: String::new(),
            program_id: None,
            park_id: None,
            schedule_id: None,
            total_hours: String::new(),
            badge: false,
            vest: "0".to_string(),
            birth_date: String::new(),
            social_server_type: SOCIAL_SERVER_TYPES[0].to_string(),
            major: String::new(),
            cell_phone: String::new(),
            blood_type: String::new(),
            allergy: String::new(),
            tutor_name: String::new(),
            tutor_phone: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            status: String::new(),
        }
    }
}

impl SocialServerDraft {
    pub fn from_social_server(server: &SocialServer) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            email: server.email.clone(),
            name: server.name.clone(),
            school: text(&server.school),
            program_id: server.program_id,
            park_id: server.park_id,
            schedule_id: server.schedule_id,
            total_hours: server
                .total_hours_required
                .map(|h| h.to_string())
                .unwrap_or_default(),
            badge: server.badge.unwrap_or(false),
            vest: server.vest.unwrap_or(0).to_string(),
            birth_date: text(&server.birth_date),
            social_server_type: server
                .social_server_type
                .clone()
                .unwrap_or_else(|| SOCIAL_SERVER_TYPES[0].to_string()),
            major: text(&server.major),
            cell_phone: text(&server.cell_phone),
            blood_type: text(&server.blood_type),
            allergy: text(&server.allergy),
            tutor_name: text(&server.tutor_name),
            tutor_phone: text(&server.tutor_phone),
            start_date: text(&server.start_date),
            end_date: text(&server.end_date),
            status: text(&server.status),
        }
    }

    pub fn validate(&self) -> Result<SocialServerRequest, FormError> {
        let email = valid_email(&self.email)?;
        let name = bounded(&self.name, "nombre", MAX_PARK_NAME_LENGTH)?;
        let school = bounded(&self.school, "escuela", MAX_SCHOOL_LENGTH)?;
        let park_id = self.park_id.ok_or(FormError::Required("parque"))?;
        let schedule_id = self.schedule_id.ok_or(FormError::Required("horario"))?;

        let total_hours = match self.total_hours.trim().parse::<u32>() {
            Ok(hours) if (1..=MAX_TOTAL_HOURS).contains(&hours) => hours,
            _ => return Err(FormError::InvalidTotalHours),
        };
        let vest = self
            .vest
            .trim()
            .parse::<u32>()
            .map_err(|_| FormError::InvalidNumber("chaleco"))?;
        let birth_date = valid_date(&self.birth_date, "fecha de nacimiento")?;
        let social_server_type = required(&self.social_server_type, "tipo de servidor social")?;

        Ok(SocialServerRequest {
            email,
            name,
            park_id,
            school,
            schedule_id,
            total_hours,
            badge: self.badge,
            vest,
            birth_date,
            social_server_type,
            major: optional(&self.major),
            cell_phone: optional(&self.cell_phone),
            blood_type: optional(&self.blood_type),
            allergy: optional(&self.allergy),
            tutor_name: optional(&self.tutor_name),
            tutor_phone: optional(&self.tutor_phone),
            start_date: optional_date(&self.start_date)?,
            end_date: optional_date(&self.end_date)?,
            status: optional(&self.status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParkWithSchedules;
    use assert_matches::assert_matches;

    fn program(total: u32) -> Program {
        Program {
            id: 3,
            name: "Huertos".to_string(),
            parks: vec![
                ParkWithSchedules {
                    id: 1,
                    park_name: "Norte".to_string(),
                    abbreviation: "N".to_string(),
                    schedules: Vec::new(),
                },
                ParkWithSchedules {
                    id: 2,
                    park_name: "Sur".to_string(),
                    abbreviation: "S".to_string(),
                    schedules: Vec::new(),
                },
            ],
            total_capacity: Some(total),
            current_capacity: Some(0),
        }
    }

    fn schedule_draft() -> ScheduleDraft {
        ScheduleDraft {
            park_ids: vec![2, 1],
            days: "Martes, Lunes".to_string(),
            capacity: "4".to_string(),
            career: "  ".to_string(),
            notes: " Traer gorra ".to_string(),
            ..ScheduleDraft::default()
        }
    }

    #[test]
    fn test_schedule_draft_builds_request() {
        let request = schedule_draft().validate(&program(10), None).unwrap();
        assert_eq!(request.park_ids, vec![1, 2]);
        assert_eq!(request.days, "Lunes, Martes");
        assert_eq!(request.start_time, "09:00");
        assert_eq!(request.end_time, "17:00");
        assert_eq!(request.capacity, 4);
        assert_eq!(request.career, None);
        assert_eq!(request.notes.as_deref(), Some("Traer gorra"));
    }

    #[test]
    fn test_schedule_draft_input_errors() {
        let program = program(10);

        let mut draft = schedule_draft();
        draft.park_ids.clear();
        assert_matches!(draft.validate(&program, None), Err(FormError::NoParksSelected));

        let mut draft = schedule_draft();
        draft.days = String::new();
        assert_matches!(draft.validate(&program, None), Err(FormError::NoDaysSelected));

        let mut draft = schedule_draft();
        draft.start_time = "9am".to_string();
        assert_matches!(draft.validate(&program, None), Err(FormError::InvalidTime(_)));

        let mut draft = schedule_draft();
        draft.end_time = "09:00".to_string();
        assert_matches!(draft.validate(&program, None), Err(FormError::EndNotAfterStart));

        let mut draft = schedule_draft();
        draft.capacity = "0".to_string();
        assert_matches!(
            draft.validate(&program, None),
            Err(FormError::Capacity(CapacityError::NotPositive))
        );

        let mut draft = schedule_draft();
        draft.park_ids.push(7);
        assert_matches!(
            draft.validate(&program, None),
            Err(FormError::Capacity(CapacityError::ParkNotInProgram { park_id: 7 }))
        );
    }

    #[test]
    fn test_schedule_draft_over_budget() {
        let error = schedule_draft().validate(&program(3), None).unwrap_err();
        assert_eq!(
            error,
            FormError::Capacity(CapacityError::ExceedsProgramTotal { sum: 4, limit: 3 })
        );
        assert!(error.to_string().contains("(4) excede la capacidad total"));
    }

    #[test]
    fn test_schedule_draft_from_schedule() {
        let schedule = Schedule {
            id: 5,
            park_ids: vec![1],
            days: "Viernes, Lunes".to_string(),
            start_time: "08:00:00".to_string(),
            end_time: "12:30:00".to_string(),
            capacity: Some(6),
            current_capacity: Some(2),
            career: Some("Biología".to_string()),
            notes: None,
        };
        let draft = ScheduleDraft::from_schedule(&schedule);
        assert_eq!(draft.days, "Lunes, Viernes");
        assert_eq!(draft.start_time, "08:00");
        assert_eq!(draft.end_time, "12:30");
        assert_eq!(draft.capacity, "6");
        assert_eq!(draft.career, "Biología");
        assert_eq!(draft.notes, "");
    }

    #[test]
    fn test_toggle_park() {
        let mut draft = ScheduleDraft::default();
        draft.toggle_park(1);
        draft.toggle_park(2);
        draft.toggle_park(1);
        assert_eq!(draft.park_ids, vec![2]);
    }

    #[test]
    fn test_program_draft() {
        let mut draft = ProgramDraft::default();
        assert_matches!(draft.validate(), Err(FormError::Required("nombre")));
        draft.name = " Reciclaje ".to_string();
        assert_matches!(draft.validate(), Err(FormError::NoParksSelected));
        draft.toggle_park(4);
        let request = draft.validate().unwrap();
        assert_eq!(request.name, "Reciclaje");
        assert_eq!(request.park_ids, vec![4]);
    }

    #[test]
    fn test_park_draft_lengths() {
        let draft = ParkDraft {
            park_name: "Parque Metropolitano".to_string(),
            abbreviation: "x".repeat(51),
        };
        assert_eq!(
            draft.validate(),
            Err(FormError::TooLong { field: "abreviatura", max: 50 })
        );

        let draft = ParkDraft {
            park_name: "Parque Metropolitano".to_string(),
            abbreviation: "PM".to_string(),
        };
        assert_eq!(draft.validate().unwrap().abbreviation, "PM");
    }

    #[test]
    fn test_user_draft() {
        let mut draft = UserDraft {
            email: "admin@parques".to_string(),
            name: "Ana".to_string(),
            password: "secreta123".to_string(),
            role: Role::SuperAdmin,
        };
        assert_matches!(draft.validate(), Err(FormError::InvalidEmail));
        draft.email = "admin@parques.gob.mx".to_string();
        draft.password = "corta".to_string();
        assert_matches!(draft.validate(), Err(FormError::PasswordTooShort));
        draft.password = "suficiente".to_string();
        assert_eq!(draft.validate().unwrap().role, Role::SuperAdmin);
    }

    #[test]
    fn test_attendance_draft() {
        let mut draft = AttendanceDraft::default();
        assert_matches!(draft.validate(), Err(FormError::Required("folio")));
        draft.folio = "-2".to_string();
        assert_matches!(draft.validate(), Err(FormError::InvalidFolio));
        draft.folio = "120".to_string();
        assert_matches!(draft.validate(), Err(FormError::Required("parque")));
        draft.park_id = Some(1);
        draft.attendance_type = Some(AttendanceType::CheckIn);
        assert_matches!(draft.validate(), Err(FormError::MissingPhoto));
        draft.has_photo = true;
        let submission = draft.validate().unwrap();
        assert_eq!(submission.folio, 120);
        assert_eq!(submission.location, None);
    }

    #[test]
    fn test_social_server_draft() {
        let mut draft = SocialServerDraft {
            email: "luis@uni.mx".to_string(),
            name: "Luis".to_string(),
            school: "UNI".to_string(),
            park_id: Some(1),
            schedule_id: Some(9),
            total_hours: "480".to_string(),
            birth_date: "2003-02-30".to_string(),
            ..SocialServerDraft::default()
        };
        assert_matches!(draft.validate(), Err(FormError::InvalidDate(_)));

        draft.birth_date = "2003-02-28".to_string();
        draft.total_hours = "10001".to_string();
        assert_matches!(draft.validate(), Err(FormError::InvalidTotalHours));

        draft.total_hours = "480".to_string();
        let request = draft.validate().unwrap();
        assert_eq!(request.total_hours, 480);
        assert_eq!(request.vest, 0);
        assert_eq!(request.major, None);
        assert_eq!(request.social_server_type, "SERVICIO_SOCIAL");
    }

    #[test]
    fn test_social_server_draft_round_trip_from_read_model() {
        let server = SocialServer {
            id: 4,
            email: "eva@uni.mx".to_string(),
            name: "Eva".to_string(),
            school: Some("UNI".to_string()),
            park_id: Some(2),
            schedule_id: Some(3),
            total_hours_required: Some(240),
            vest: Some(12),
            badge: Some(true),
            birth_date: Some("2002-05-01".to_string()),
            ..SocialServer::default()
        };
        let request = SocialServerDraft::from_social_server(&server).validate().unwrap();
        assert_eq!(request.vest, 12);
        assert!(request.badge);
        assert_eq!(request.schedule_id, 3);
    }
}
