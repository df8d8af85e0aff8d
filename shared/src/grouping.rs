//! Display model for a program's schedules.
//!
//! A program response nests each schedule under every park it covers. The
//! view built here reduces that fan-out to one entry per schedule id, buckets
//! schedules by their exact park set and reports parks nothing covers.

use indexmap::IndexMap;
use log::debug;
use std::collections::HashSet;
use std::fmt;

use crate::models::{Park, Program, Schedule};

/// Identity of a schedule group: the sorted park set, or the sentinel for
/// schedules that carry no park ids at all
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Parks(String),
    Unassigned,
}

impl GroupKey {
    pub fn for_parks(park_ids: &[i64]) -> GroupKey {
        if park_ids.is_empty() {
            return GroupKey::Unassigned;
        }
        let mut sorted = park_ids.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        GroupKey::Parks(
            sorted
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Parks(key) => f.write_str(key),
            GroupKey::Unassigned => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleGroup {
    pub key: GroupKey,
    /// Sorted, deduplicated park ids shared by every schedule in the group
    pub park_ids: Vec<i64>,
    pub schedules: Vec<Schedule>,
}

impl ScheduleGroup {
    /// Heading for the group, e.g. "Parque Norte, Parque Sur"
    pub fn title(&self, program: &Program) -> String {
        if self.key == GroupKey::Unassigned {
            return "Sin parque asignado".to_string();
        }
        self.park_ids
            .iter()
            .map(|id| match program.park_name(*id) {
                Some(name) => name.to_string(),
                None => format!("#{}", id),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn total_capacity(&self) -> u32 {
        self.schedules.iter().map(Schedule::capacity_or_zero).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgramScheduleView {
    pub groups: Vec<ScheduleGroup>,
    pub parks_without_schedules: Vec<Park>,
}

impl ProgramScheduleView {
    pub fn build(program: &Program) -> Self {
        let unique = unique_schedules(program);

        let mut groups: IndexMap<GroupKey, ScheduleGroup> = IndexMap::new();
        let mut covered: HashSet<i64> = HashSet::new();

        for schedule in unique.values() {
            covered.extend(schedule.park_ids.iter().copied());

            let key = GroupKey::for_parks(&schedule.park_ids);
            groups
                .entry(key.clone())
                .or_insert_with(|| {
                    let mut park_ids = schedule.park_ids.clone();
                    park_ids.sort_unstable();
                    park_ids.dedup();
                    ScheduleGroup {
                        key,
                        park_ids,
                        schedules: Vec::new(),
                    }
                })
                .schedules
                .push(schedule.clone());
        }

        let parks_without_schedules: Vec<Park> = program
            .parks
            .iter()
            .filter(|park| !covered.contains(&park.id))
            .map(|park| park.as_park())
            .collect();

        debug!(
            "Program {} grouped into {} schedule groups ({} unique schedules, {} parks without schedules)",
            program.id,
            groups.len(),
            unique.len(),
            parks_without_schedules.len()
        );

        Self {
            groups: groups.into_values().collect(),
            parks_without_schedules,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn schedule_count(&self) -> usize {
        self.groups.iter().map(|g| g.schedules.len()).sum()
    }
}

/// Reduce the nested park→schedule fan-out into one entry per schedule id,
/// in first-encountered order
pub fn unique_schedules(program: &Program) -> IndexMap<i64, Schedule> {
    program
        .parks
        .iter()
        .flat_map(|park| park.schedules.iter())
        .fold(IndexMap::new(), |mut acc, schedule| {
            acc.entry(schedule.id).or_insert_with(|| schedule.clone());
            acc
        })
}

/// Unique schedules of a program that cover the given park
pub fn schedules_for_park(program: &Program, park_id: i64) -> Vec<Schedule> {
    unique_schedules(program)
        .into_values()
        .filter(|schedule| schedule.covers_park(park_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParkWithSchedules;

    fn schedule(id: i64, park_ids: &[i64], capacity: u32) -> Schedule {
        Schedule {
            id,
            park_ids: park_ids.to_vec(),
            days: "Lunes".to_string(),
            start_time: "09:00".to_string(),
            end_time: "12:00".to_string(),
            capacity: Some(capacity),
            current_capacity: Some(0),
            career: None,
            notes: None,
        }
    }

    fn park(id: i64, name: &str, schedules: Vec<Schedule>) -> ParkWithSchedules {
        ParkWithSchedules {
            id,
            park_name: name.to_string(),
            abbreviation: name[..1].to_string(),
            schedules,
        }
    }

    fn program(parks: Vec<ParkWithSchedules>) -> Program {
        Program {
            id: 1,
            name: "Reciclaje".to_string(),
            parks,
            total_capacity: Some(20),
            current_capacity: Some(0),
        }
    }

    #[test]
    fn test_group_key_sorts_and_dedups() {
        assert_eq!(GroupKey::for_parks(&[3, 1, 2, 1]), GroupKey::Parks("1,2,3".to_string()));
        assert_eq!(GroupKey::for_parks(&[]), GroupKey::Unassigned);
        assert_eq!(GroupKey::Unassigned.to_string(), "unknown");
    }

    #[test]
    fn test_shared_schedule_counted_once() {
        let shared = schedule(10, &[1, 2, 3], 5);
        let program = program(vec![
            park(1, "Norte", vec![shared.clone()]),
            park(2, "Sur", vec![shared.clone()]),
            park(3, "Este", vec![shared]),
        ]);

        let view = ProgramScheduleView::build(&program);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.schedule_count(), 1);
        assert_eq!(view.groups[0].title(&program), "Norte, Sur, Este");
        assert!(view.parks_without_schedules.is_empty());
    }

    #[test]
    fn test_overlapping_park_sets_are_distinct_groups() {
        let ab = schedule(1, &[1, 2], 2);
        let a = schedule(2, &[1], 3);
        let abc = schedule(3, &[2, 1, 3], 4);
        let program = program(vec![
            park(1, "Norte", vec![ab.clone(), a, abc.clone()]),
            park(2, "Sur", vec![ab, abc.clone()]),
            park(3, "Este", vec![abc]),
        ]);

        let view = ProgramScheduleView::build(&program);
        let keys: Vec<String> = view.groups.iter().map(|g| g.key.to_string()).collect();
        // First-encountered order, not sorted
        assert_eq!(keys, vec!["1,2", "1", "1,2,3"]);
    }

    #[test]
    fn test_same_park_set_shares_group() {
        let first = schedule(1, &[2, 1], 2);
        let second = schedule(2, &[1, 2], 3);
        let program = program(vec![
            park(1, "Norte", vec![first.clone(), second.clone()]),
            park(2, "Sur", vec![first, second]),
        ]);

        let view = ProgramScheduleView::build(&program);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].schedules.len(), 2);
        assert_eq!(view.groups[0].total_capacity(), 5);
    }

    #[test]
    fn test_schedule_without_parks_goes_to_sentinel_group() {
        let orphan = schedule(9, &[], 1);
        let program = program(vec![park(1, "Norte", vec![orphan])]);

        let view = ProgramScheduleView::build(&program);
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].key, GroupKey::Unassigned);
        assert_eq!(view.groups[0].title(&program), "Sin parque asignado");
        // Nothing references park 1 through parkIds
        assert_eq!(view.parks_without_schedules.len(), 1);
    }

    #[test]
    fn test_null_park_ids_from_backend_still_render() {
        let json = r#"{"id": 2, "name": "Huertos", "totalCapacity": 6, "parks": [
            {"id": 1, "parkName": "Norte", "schedules": [
                {"id": 11, "parkIds": null, "days": "Sábado", "startTime": "09:00", "endTime": "12:00", "capacity": 3},
                {"id": 12, "parkIds": [1], "days": "Lunes", "startTime": "09:00", "endTime": "12:00", "capacity": 3}
            ]}
        ]}"#;
        let program: Program = serde_json::from_str(json).unwrap();

        let view = ProgramScheduleView::build(&program);
        assert_eq!(view.schedule_count(), 2);
        let orphan_group = view
            .groups
            .iter()
            .find(|g| g.key == GroupKey::Unassigned)
            .unwrap();
        assert_eq!(orphan_group.schedules[0].id, 11);
        assert!(view.parks_without_schedules.is_empty());
    }

    #[test]
    fn test_unknown_park_id_in_title() {
        let stray = schedule(4, &[1, 99], 1);
        let program = program(vec![park(1, "Norte", vec![stray])]);
        let view = ProgramScheduleView::build(&program);
        assert_eq!(view.groups[0].title(&program), "Norte, #99");
    }

    #[test]
    fn test_schedules_for_park() {
        let ab = schedule(1, &[1, 2], 2);
        let b = schedule(2, &[2], 3);
        let program = program(vec![park(1, "Norte", vec![ab.clone()]), park(2, "Sur", vec![ab, b])]);

        let for_north: Vec<i64> = schedules_for_park(&program, 1).iter().map(|s| s.id).collect();
        let for_south: Vec<i64> = schedules_for_park(&program, 2).iter().map(|s| s.id).collect();
        assert_eq!(for_north, vec![1]);
        assert_eq!(for_south, vec![1, 2]);
        assert!(schedules_for_park(&program, 3).is_empty());
    }

    #[test]
    fn test_empty_program() {
        let view = ProgramScheduleView::build(&program(Vec::new()));
        assert!(view.is_empty());
        assert!(view.parks_without_schedules.is_empty());
    }
}
