pub mod use_column_layout;
pub mod use_geolocation;
pub mod use_programs;
pub mod use_session;
