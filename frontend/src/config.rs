use log::LevelFilter;

const DEFAULT_API_PORT: u16 = 8081;

/// Runtime settings resolved once at start-up
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub photos_base_url: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Resolve from build-time overrides, falling back to the page's host
    pub fn load() -> Self {
        let api_base_url = match option_env!("ASISTENCIAS_API_URL") {
            Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => default_api_url(&current_hostname()),
        };

        let log_level = option_env!("ASISTENCIAS_LOG_LEVEL")
            .and_then(parse_level)
            .unwrap_or(LevelFilter::Info);

        Self {
            photos_base_url: format!("{}/admin/photos", api_base_url),
            api_base_url,
            log_level,
        }
    }

    /// URL of a stored attendance or profile photo
    pub fn photo_url(&self, photo_path: &str) -> String {
        format!("{}/{}", self.photos_base_url, photo_path.trim_start_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let api_base_url = default_api_url("localhost");
        Self {
            photos_base_url: format!("{}/admin/photos", api_base_url),
            api_base_url,
            log_level: LevelFilter::Info,
        }
    }
}

fn current_hostname() -> String {
    web_sys::window()
        .and_then(|w| w.location().hostname().ok())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

fn default_api_url(host: &str) -> String {
    format!("http://{}:{}/api", host, DEFAULT_API_PORT)
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url() {
        assert_eq!(default_api_url("10.0.0.5"), "http://10.0.0.5:8081/api");
    }

    #[test]
    fn test_photo_url_joins_paths() {
        let config = AppConfig::default();
        assert_eq!(
            config.photo_url("/2025/03/foto.jpg"),
            "http://localhost:8081/api/admin/photos/2025/03/foto.jpg"
        );
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" warn "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("verbose"), None);
    }
}
