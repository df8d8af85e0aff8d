//! Free-text filtering for the admin tables.

use crate::models::{Attendance, SocialServer};

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        other => other,
    }
}

/// Lowercase, trim and strip Spanish diacritics so "Álvaro" matches "alvaro"
pub fn normalize(text: &str) -> String {
    text.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_char)
        .collect()
}

/// Whether any field contains the query. An empty query matches everything.
pub fn matches<'a, I>(fields: I, query: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = normalize(query);
    if needle.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .any(|field| normalize(field).contains(&needle))
}

pub fn filter_social_servers<'a>(servers: &'a [SocialServer], query: &str) -> Vec<&'a SocialServer> {
    servers
        .iter()
        .filter(|server| {
            let folio = server.id.to_string();
            matches(
                [
                    server.name.as_str(),
                    server.email.as_str(),
                    server.school.as_deref().unwrap_or(""),
                    folio.as_str(),
                ],
                query,
            )
        })
        .collect()
}

pub fn filter_attendances<'a>(attendances: &'a [Attendance], query: &str) -> Vec<&'a Attendance> {
    attendances
        .iter()
        .filter(|attendance| {
            matches(
                [
                    attendance.social_server_name.as_str(),
                    attendance.social_server_email.as_deref().unwrap_or(""),
                    attendance.park_name.as_str(),
                ],
                query,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceType;

    fn server(id: i64, name: &str, email: &str, school: Option<&str>) -> SocialServer {
        SocialServer {
            id,
            name: name.to_string(),
            email: email.to_string(),
            school: school.map(str::to_string),
            ..SocialServer::default()
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Álvaro Muñoz "), "alvaro munoz");
        assert_eq!(normalize("MIÉRCOLES"), "miercoles");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_matches_any_field() {
        assert!(matches(["Ana", "ana@uni.mx"], "UNI"));
        assert!(matches(["José"], "jose"));
        assert!(!matches(["Ana", "ana@uni.mx"], "pedro"));
        assert!(matches(std::iter::empty::<&str>(), "   "));
    }

    #[test]
    fn test_filter_social_servers() {
        let servers = vec![
            server(101, "María López", "maria@uni.mx", Some("Tecnológico")),
            server(202, "Pedro", "pedro@correo.mx", None),
        ];

        let by_school: Vec<i64> = filter_social_servers(&servers, "tecnologico").iter().map(|s| s.id).collect();
        assert_eq!(by_school, vec![101]);

        let by_folio: Vec<i64> = filter_social_servers(&servers, "202").iter().map(|s| s.id).collect();
        assert_eq!(by_folio, vec![202]);

        assert_eq!(filter_social_servers(&servers, "").len(), 2);
        assert!(filter_social_servers(&servers, "zzz").is_empty());
    }

    #[test]
    fn test_filter_attendances() {
        let attendances = vec![Attendance {
            id: 1,
            social_server_id: Some(3),
            social_server_name: "Ana".to_string(),
            social_server_email: None,
            park_id: Some(1),
            park_name: "Parque Río".to_string(),
            timestamp: "2025-03-01T08:00:00".to_string(),
            attendance_type: AttendanceType::CheckIn,
            photo_path: None,
        }];
        assert_eq!(filter_attendances(&attendances, "rio").len(), 1);
        assert!(filter_attendances(&attendances, "norte").is_empty());
    }
}
