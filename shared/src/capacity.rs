//! Advisory capacity check run before a schedule is created or updated.
//!
//! The backend re-validates every request; a pass here only means the
//! request is worth sending.

use log::debug;

use crate::grouping::unique_schedules;
use crate::models::Program;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    #[error("La capacidad debe ser un número entero mayor a 0")]
    NotPositive,
    #[error("El parque {park_id} no pertenece al programa")]
    ParkNotInProgram { park_id: i64 },
    #[error("La suma de las capacidades de los horarios ({sum}) excede la capacidad total del programa ({limit})")]
    ExceedsProgramTotal { sum: u64, limit: u32 },
}

/// Parse a raw capacity input into a positive integer
pub fn parse_capacity(raw: &str) -> Result<u32, CapacityError> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => u32::try_from(value).map_err(|_| CapacityError::NotPositive),
        _ => Err(CapacityError::NotPositive),
    }
}

/// Sum of the capacities of a program's unique schedules, leaving out `excluding`
pub fn committed_capacity(program: &Program, excluding: Option<i64>) -> u64 {
    unique_schedules(program)
        .values()
        .filter(|schedule| Some(schedule.id) != excluding)
        .map(|schedule| u64::from(schedule.capacity_or_zero()))
        .sum()
}

/// Validate a candidate schedule capacity against its owning program.
///
/// `editing` is the id of the schedule being replaced, if any. Returns the
/// parsed capacity on success.
pub fn validate_schedule_capacity(
    program: &Program,
    raw_capacity: &str,
    park_ids: &[i64],
    editing: Option<i64>,
) -> Result<u32, CapacityError> {
    let capacity = parse_capacity(raw_capacity)?;

    if let Some(&park_id) = park_ids.iter().find(|id| !program.has_park(**id)) {
        debug!("Rejected schedule for program {}: park {} not attached", program.id, park_id);
        return Err(CapacityError::ParkNotInProgram { park_id });
    }

    let sum = committed_capacity(program, editing) + u64::from(capacity);
    let limit = program.capacity_limit();
    if sum > u64::from(limit) {
        debug!("Rejected schedule for program {}: {} > {}", program.id, sum, limit);
        return Err(CapacityError::ExceedsProgramTotal { sum, limit });
    }

    debug!("Accepted schedule capacity {} for program {} ({} of {})", capacity, program.id, sum, limit);
    Ok(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ParkWithSchedules, Schedule};
    use assert_matches::assert_matches;

    fn schedule(id: i64, park_ids: &[i64], capacity: Option<u32>) -> Schedule {
        Schedule {
            id,
            park_ids: park_ids.to_vec(),
            days: "Lunes".to_string(),
            start_time: "09:00".to_string(),
            end_time: "12:00".to_string(),
            capacity,
            current_capacity: None,
            career: None,
            notes: None,
        }
    }

    fn program_with(total: u32, parks: Vec<(i64, Vec<Schedule>)>) -> Program {
        Program {
            id: 1,
            name: "Reciclaje".to_string(),
            parks: parks
                .into_iter()
                .map(|(id, schedules)| ParkWithSchedules {
                    id,
                    park_name: format!("Parque {}", id),
                    abbreviation: format!("P{}", id),
                    schedules,
                })
                .collect(),
            total_capacity: Some(total),
            current_capacity: None,
        }
    }

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity("5"), Ok(5));
        assert_eq!(parse_capacity("  12 "), Ok(12));
        assert_matches!(parse_capacity(""), Err(CapacityError::NotPositive));
        assert_matches!(parse_capacity("0"), Err(CapacityError::NotPositive));
        assert_matches!(parse_capacity("-3"), Err(CapacityError::NotPositive));
        assert_matches!(parse_capacity("2.5"), Err(CapacityError::NotPositive));
        assert_matches!(parse_capacity("diez"), Err(CapacityError::NotPositive));
        assert_matches!(parse_capacity("99999999999"), Err(CapacityError::NotPositive));
    }

    #[test]
    fn test_numeric_check_runs_before_sum() {
        // Program already over budget; a bad number must still report the number
        let program = program_with(1, vec![(1, vec![schedule(1, &[1], Some(50))])]);
        assert_matches!(
            validate_schedule_capacity(&program, "abc", &[1], None),
            Err(CapacityError::NotPositive)
        );
    }

    #[test]
    fn test_park_membership() {
        let program = program_with(100, vec![(1, vec![]), (2, vec![])]);
        assert_matches!(
            validate_schedule_capacity(&program, "3", &[1, 5, 6], None),
            Err(CapacityError::ParkNotInProgram { park_id: 5 })
        );
        assert_eq!(validate_schedule_capacity(&program, "3", &[2, 1], None), Ok(3));
    }

    #[test]
    fn test_shared_schedule_summed_once() {
        let shared = schedule(1, &[1, 2], Some(6));
        let program = program_with(10, vec![(1, vec![shared.clone()]), (2, vec![shared])]);
        assert_eq!(committed_capacity(&program, None), 6);
        assert_eq!(validate_schedule_capacity(&program, "4", &[1], None), Ok(4));
    }

    #[test]
    fn test_missing_capacity_counts_as_zero() {
        let program = program_with(5, vec![(1, vec![schedule(1, &[1], None)])]);
        assert_eq!(validate_schedule_capacity(&program, "5", &[1], None), Ok(5));
    }

    #[test]
    fn test_edit_excludes_self() {
        let program = program_with(
            10,
            vec![(1, vec![schedule(1, &[1], Some(6)), schedule(2, &[1], Some(3))])],
        );
        assert_eq!(validate_schedule_capacity(&program, "7", &[1], Some(1)), Ok(7));
        assert_eq!(
            validate_schedule_capacity(&program, "8", &[1], Some(1)),
            Err(CapacityError::ExceedsProgramTotal { sum: 11, limit: 10 })
        );
    }

    #[test]
    fn test_error_message_carries_sum_and_limit() {
        let error = CapacityError::ExceedsProgramTotal { sum: 11, limit: 10 };
        let message = error.to_string();
        assert!(message.contains("(11) excede la capacidad total"));
        assert!(message.ends_with("(10)"));
    }
}
