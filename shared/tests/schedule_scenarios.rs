use assert_matches::assert_matches;
use shared::capacity::{validate_schedule_capacity, CapacityError};
use shared::days::{days_label, toggle_day, Weekday};
use shared::grouping::{GroupKey, ProgramScheduleView};
use shared::{ParkWithSchedules, Program, Schedule};

const PARK_A: i64 = 1;
const PARK_B: i64 = 2;
const PARK_C: i64 = 3;

fn schedule(id: i64, park_ids: &[i64], capacity: u32) -> Schedule {
    Schedule {
        id,
        park_ids: park_ids.to_vec(),
        days: "Lunes, Martes, Miércoles, Jueves, Viernes".to_string(),
        start_time: "09:00".to_string(),
        end_time: "13:00".to_string(),
        capacity: Some(capacity),
        current_capacity: Some(0),
        career: None,
        notes: None,
    }
}

/// Build a program response the way the backend nests it: every schedule is
/// repeated under each park it covers.
fn program(total: u32, park_ids: &[i64], schedules: Vec<Schedule>) -> Program {
    let parks = park_ids
        .iter()
        .map(|&id| ParkWithSchedules {
            id,
            park_name: format!("Parque {}", id),
            abbreviation: format!("P{}", id),
            schedules: schedules
                .iter()
                .filter(|s| s.park_ids.contains(&id))
                .cloned()
                .collect(),
        })
        .collect();

    Program {
        id: 1,
        name: "Reciclaje".to_string(),
        parks,
        total_capacity: Some(total),
        current_capacity: Some(0),
    }
}

#[test]
fn creating_over_program_total_is_rejected() {
    let reciclaje = program(10, &[PARK_A], vec![schedule(1, &[PARK_A], 6)]);

    let result = validate_schedule_capacity(&reciclaje, "5", &[PARK_A], None);

    assert_eq!(result, Err(CapacityError::ExceedsProgramTotal { sum: 11, limit: 10 }));
    let message = result.unwrap_err().to_string();
    assert!(message.contains("(11)"));
    assert!(message.contains("(10)"));
}

#[test]
fn creating_up_to_program_total_is_accepted() {
    let reciclaje = program(10, &[PARK_A], vec![schedule(1, &[PARK_A], 6)]);

    assert_eq!(validate_schedule_capacity(&reciclaje, "4", &[PARK_A], None), Ok(4));
}

#[test]
fn editing_excludes_the_schedule_being_replaced() {
    let reciclaje = program(10, &[PARK_A], vec![schedule(1, &[PARK_A], 6)]);

    assert_eq!(validate_schedule_capacity(&reciclaje, "8", &[PARK_A], Some(1)), Ok(8));
}

#[test]
fn resubmitting_same_capacity_on_edit_never_fails() {
    let full = program(
        10,
        &[PARK_A, PARK_B],
        vec![schedule(1, &[PARK_A, PARK_B], 6), schedule(2, &[PARK_B], 4)],
    );

    assert_eq!(validate_schedule_capacity(&full, "6", &[PARK_A, PARK_B], Some(1)), Ok(6));
    assert_eq!(validate_schedule_capacity(&full, "4", &[PARK_B], Some(2)), Ok(4));
}

#[test]
fn non_numeric_or_non_positive_rejected_before_budget() {
    let reciclaje = program(10, &[PARK_A], vec![schedule(1, &[PARK_A], 6)]);

    for raw in ["", "  ", "cero", "0", "-1", "3.5", "1e3"] {
        assert_matches!(
            validate_schedule_capacity(&reciclaje, raw, &[PARK_A], None),
            Err(CapacityError::NotPositive),
            "input {:?}",
            raw
        );
    }
}

#[test]
fn toggling_weekdays_out_of_order_yields_canonical_weekdays() {
    let days = [
        Weekday::Viernes,
        Weekday::Lunes,
        Weekday::Miercoles,
        Weekday::Martes,
        Weekday::Jueves,
    ]
    .into_iter()
    .fold(String::new(), |days, day| toggle_day(&days, day));

    assert_eq!(days, "Lunes, Martes, Miércoles, Jueves, Viernes");
    assert_eq!(days_label(&days), "Lunes a Viernes");
}

#[test]
fn grouping_covers_every_park() {
    let program = program(
        20,
        &[PARK_A, PARK_B, PARK_C],
        vec![schedule(1, &[PARK_A, PARK_B], 5), schedule(2, &[PARK_C], 5)],
    );

    let view = ProgramScheduleView::build(&program);

    assert_eq!(view.groups.len(), 2);
    assert_eq!(view.groups[0].key, GroupKey::Parks("1,2".to_string()));
    assert_eq!(view.groups[1].key, GroupKey::Parks("3".to_string()));
    assert!(view.parks_without_schedules.is_empty());
}

#[test]
fn park_without_schedules_is_reported_and_not_grouped() {
    let program = program(
        20,
        &[PARK_A, PARK_B, PARK_C],
        vec![schedule(1, &[PARK_A, PARK_B], 5), schedule(2, &[PARK_A], 5)],
    );

    let view = ProgramScheduleView::build(&program);

    let without: Vec<i64> = view.parks_without_schedules.iter().map(|p| p.id).collect();
    assert_eq!(without, vec![PARK_C]);
    assert!(view.groups.iter().all(|g| !g.park_ids.contains(&PARK_C)));
}

#[test]
fn schedule_spanning_three_parks_renders_once() {
    let program = program(
        20,
        &[PARK_A, PARK_B, PARK_C],
        vec![schedule(7, &[PARK_C, PARK_A, PARK_B], 5)],
    );
    assert_eq!(program.parks.iter().map(|p| p.schedules.len()).sum::<usize>(), 3);

    let view = ProgramScheduleView::build(&program);

    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.schedule_count(), 1);
    assert_eq!(view.groups[0].schedules[0].id, 7);
}
