use gloo::net::http::{Request, RequestBuilder, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    AffectedServers, ApiErrorBody, Attendance, AttendanceReceipt, AttendanceSubmission,
    CreateUserRequest, LoginRequest, LoginResponse, Park, ParkRequest, PhotoSizeLimit, Program,
    ProgramRequest, Schedule, ScheduleRequest, SocialServer, SocialServerRequest, User,
};
use web_sys::{File, FormData};

use crate::services::storage::SessionStore;

/// Failure of a backend call. Server messages are kept verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Error de red: {0}")]
    Network(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Respuesta inválida del servidor: {0}")]
    Decode(String),
}

impl From<gloo::net::Error> for ApiError {
    fn from(e: gloo::net::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// Turn a rejected response into an error carrying the backend's own message
async fn error_from(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .ok()
        .and_then(ApiErrorBody::into_message)
        .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| format!("{} {}", status, response.status_text()));

    warn!("Backend rejected request ({}): {}", status, message);
    ApiError::Server { status, message }
}

/// API client for the attendance backend
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(builder: RequestBuilder) -> RequestBuilder {
        match SessionStore::token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            return Err(error_from(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn read_empty(response: Response) -> Result<(), ApiError> {
        if response.ok() {
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("GET {}", path);
        let response = Self::authorize(Request::get(&self.url(path))).send().await?;
        Self::read(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        debug!("POST {}", path);
        let response = Self::authorize(Request::post(&self.url(path)))
            .json(body)?
            .send()
            .await?;
        Self::read(response).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        debug!("PUT {}", path);
        let response = Self::authorize(Request::put(&self.url(path)))
            .json(body)?
            .send()
            .await?;
        Self::read(response).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("DELETE {}", path);
        let response = Self::authorize(Request::delete(&self.url(path))).send().await?;
        Self::read(response).await
    }

    async fn delete_empty(&self, path: &str) -> Result<(), ApiError> {
        debug!("DELETE {}", path);
        let response = Self::authorize(Request::delete(&self.url(path))).send().await?;
        Self::read_empty(response).await
    }

    // Auth

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = Request::post(&self.url("/auth/login"))
            .json(request)?
            .send()
            .await?;
        Self::read(response).await
    }

    // Parks

    pub async fn get_parks(&self) -> Result<Vec<Park>, ApiError> {
        self.get("/parques").await
    }

    pub async fn create_park(&self, request: &ParkRequest) -> Result<Park, ApiError> {
        self.post("/parques", request).await
    }

    pub async fn update_park(&self, park_id: i64, request: &ParkRequest) -> Result<Park, ApiError> {
        self.put(&format!("/parques/{}", park_id), request).await
    }

    pub async fn delete_park(&self, park_id: i64) -> Result<(), ApiError> {
        self.delete_empty(&format!("/parques/{}", park_id)).await
    }

    // Programs and schedules

    pub async fn get_programs(&self) -> Result<Vec<Program>, ApiError> {
        self.get("/programs").await
    }

    pub async fn create_program(&self, request: &ProgramRequest) -> Result<Program, ApiError> {
        self.post("/programs", request).await
    }

    pub async fn update_program(&self, program_id: i64, request: &ProgramRequest) -> Result<Program, ApiError> {
        self.put(&format!("/programs/{}", program_id), request).await
    }

    /// Returns the names of the social servers detached from the program's schedules
    pub async fn delete_program(&self, program_id: i64) -> Result<AffectedServers, ApiError> {
        self.delete(&format!("/programs/{}", program_id)).await
    }

    pub async fn create_schedule(&self, program_id: i64, request: &ScheduleRequest) -> Result<Schedule, ApiError> {
        self.post(&format!("/programs/{}/schedules", program_id), request)
            .await
    }

    pub async fn update_schedule(
        &self,
        program_id: i64,
        schedule_id: i64,
        request: &ScheduleRequest,
    ) -> Result<Schedule, ApiError> {
        self.put(
            &format!("/programs/{}/schedules/{}", program_id, schedule_id),
            request,
        )
        .await
    }

    /// Returns the names of the social servers detached from the schedule
    pub async fn delete_schedule(&self, program_id: i64, schedule_id: i64) -> Result<AffectedServers, ApiError> {
        self.delete(&format!("/programs/{}/schedules/{}", program_id, schedule_id))
            .await
    }

    // Social servers

    pub async fn get_social_servers(&self) -> Result<Vec<SocialServer>, ApiError> {
        self.get("/servidores-sociales").await
    }

    pub async fn create_social_server(&self, request: &SocialServerRequest) -> Result<SocialServer, ApiError> {
        self.post("/servidores-sociales", request).await
    }

    pub async fn update_social_server(
        &self,
        server_id: i64,
        request: &SocialServerRequest,
    ) -> Result<SocialServer, ApiError> {
        self.put(&format!("/servidores-sociales/{}", server_id), request)
            .await
    }

    pub async fn delete_social_server(&self, server_id: i64) -> Result<(), ApiError> {
        self.delete_empty(&format!("/servidores-sociales/{}", server_id))
            .await
    }

    /// Bulk-load social servers from an `.xlsx`/`.xls` workbook
    pub async fn import_social_servers(&self, workbook: &File) -> Result<(), ApiError> {
        debug!("POST /servidores-sociales/import ({})", workbook.name());
        let form = file_form("file", workbook)
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

        let response = Self::authorize(Request::post(&self.url("/servidores-sociales/import")))
            .body(form)?
            .send()
            .await?;
        Self::read_empty(response).await
    }

    /// Workbook bytes of every social server
    pub async fn export_social_servers(&self) -> Result<Vec<u8>, ApiError> {
        debug!("GET /servidores-sociales/export");
        let response = Self::authorize(Request::get(&self.url("/servidores-sociales/export")))
            .send()
            .await?;
        if !response.ok() {
            return Err(error_from(response).await);
        }
        response
            .binary()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    // Attendances

    pub async fn get_attendances(&self) -> Result<Vec<Attendance>, ApiError> {
        self.get("/asistencias").await
    }

    pub async fn get_attendances_for(&self, server_id: i64) -> Result<Vec<Attendance>, ApiError> {
        self.get(&format!("/asistencias/servidor-social/{}", server_id))
            .await
    }

    /// Multipart check-in/check-out with the photo evidence
    pub async fn register_attendance(
        &self,
        submission: &AttendanceSubmission,
        photo: &File,
    ) -> Result<AttendanceReceipt, ApiError> {
        let form = attendance_form(submission, photo)
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

        let response = Self::authorize(Request::post(&self.url("/asistencias")))
            .body(form)?
            .send()
            .await?;
        Self::read(response).await
    }

    // Users

    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/admin/users").await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ApiError> {
        self.post("/admin/users", request).await
    }

    // Configuration

    pub async fn get_photo_size_limit(&self) -> Result<PhotoSizeLimit, ApiError> {
        self.get("/configurations/photo-size-limit").await
    }

    pub async fn update_photo_size_limit(&self, limit: PhotoSizeLimit) -> Result<(), ApiError> {
        debug!("PUT /configurations/photo-size-limit");
        let response = Self::authorize(Request::put(&self.url("/configurations/photo-size-limit")))
            .json(&limit)?
            .send()
            .await?;
        Self::read_empty(response).await
    }
}

fn file_form(field: &str, file: &File) -> Result<FormData, wasm_bindgen::JsValue> {
    let form = FormData::new()?;
    form.append_with_blob_and_filename(field, file, &file.name())?;
    Ok(form)
}

fn attendance_form(submission: &AttendanceSubmission, photo: &File) -> Result<FormData, wasm_bindgen::JsValue> {
    let form = FormData::new()?;
    form.append_with_str("id", &submission.folio.to_string())?;
    form.append_with_str("parkId", &submission.park_id.to_string())?;
    form.append_with_str("type", submission.attendance_type.as_str())?;
    form.append_with_blob_and_filename("photo", photo, &photo.name())?;
    if let Some(location) = submission.location {
        form.append_with_str("latitude", &location.latitude.to_string())?;
        form.append_with_str("longitude", &location.longitude.to_string())?;
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_path() {
        let client = ApiClient::new("http://parques:8081/api");
        assert_eq!(client.url("/programs/3/schedules"), "http://parques:8081/api/programs/3/schedules");
    }

    #[test]
    fn test_server_error_displays_backend_message() {
        let error = ApiError::Server {
            status: 400,
            message: "El horario no pertenece al programa especificado".to_string(),
        };
        assert_eq!(error.to_string(), "El horario no pertenece al programa especificado");
    }
}
