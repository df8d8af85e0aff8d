//! Domain model and client-side rules shared by the parks attendance console.

pub mod capacity;
pub mod days;
pub mod forms;
pub mod grouping;
pub mod models;
pub mod preferences;
pub mod search;
pub mod time;

pub use capacity::{validate_schedule_capacity, CapacityError};
pub use days::{days_label, DaySelection, Weekday};
pub use forms::FormError;
pub use grouping::{GroupKey, ProgramScheduleView, ScheduleGroup};
pub use models::*;
pub use preferences::{ColumnLayout, PreferencesStore};
