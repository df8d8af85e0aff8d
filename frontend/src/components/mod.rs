pub mod attendance_form;
pub mod attendance_list;
pub mod day_selector;
pub mod login;
pub mod navbar;
pub mod park_management;
pub mod photo_size_modal;
pub mod program_form_modal;
pub mod program_management;
pub mod schedule_form_modal;
pub mod social_server_form;
pub mod social_servers;
pub mod time_picker;
pub mod user_management;
