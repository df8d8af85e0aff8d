use std::collections::BTreeSet;
use std::fmt;

/// Separator used when storing a day selection
pub const DAYS_SEPARATOR: &str = ", ";

/// The stored form of a Monday-through-Friday selection
pub const WEEKDAYS_STRING: &str = "Lunes, Martes, Miércoles, Jueves, Viernes";

/// Display label for [`WEEKDAYS_STRING`]
pub const WEEKDAYS_LABEL: &str = "Lunes a Viernes";

/// Day of the week in canonical Monday-first order.
///
/// The derived `Ord` follows declaration order, which is what keeps a
/// [`DaySelection`] canonically sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Lunes,
        Weekday::Martes,
        Weekday::Miercoles,
        Weekday::Jueves,
        Weekday::Viernes,
        Weekday::Sabado,
        Weekday::Domingo,
    ];

    /// Stored name
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Lunes => "Lunes",
            Weekday::Martes => "Martes",
            Weekday::Miercoles => "Miércoles",
            Weekday::Jueves => "Jueves",
            Weekday::Viernes => "Viernes",
            Weekday::Sabado => "Sábado",
            Weekday::Domingo => "Domingo",
        }
    }

    /// Button label in the day selector
    pub fn short_label(&self) -> &'static str {
        match self {
            Weekday::Lunes => "Lun",
            Weekday::Martes => "Mar",
            Weekday::Miercoles => "Mié",
            Weekday::Jueves => "Jue",
            Weekday::Viernes => "Vie",
            Weekday::Sabado => "Sáb",
            Weekday::Domingo => "Dom",
        }
    }

    pub fn from_name(name: &str) -> Option<Weekday> {
        Weekday::ALL.into_iter().find(|day| day.name() == name)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A subset of the seven weekdays, always rendered in canonical order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySelection {
    days: BTreeSet<Weekday>,
}

impl DaySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored days string. Unrecognised names are dropped.
    pub fn parse(value: &str) -> Self {
        let days = value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .filter_map(Weekday::from_name)
            .collect();
        Self { days }
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Add the day if absent, remove it if present
    pub fn toggle(&mut self, day: Weekday) {
        if !self.days.remove(&day) {
            self.days.insert(day);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.days.iter().copied()
    }

    /// Stored representation, re-derived from the canonical weekday list
    pub fn to_days_string(&self) -> String {
        Weekday::ALL
            .iter()
            .filter(|day| self.days.contains(day))
            .map(Weekday::name)
            .collect::<Vec<_>>()
            .join(DAYS_SEPARATOR)
    }
}

impl fmt::Display for DaySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_days_string())
    }
}

impl FromIterator<Weekday> for DaySelection {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

/// Toggle one day in a stored days string and return the canonical result
pub fn toggle_day(days: &str, day: Weekday) -> String {
    let mut selection = DaySelection::parse(days);
    selection.toggle(day);
    selection.to_days_string()
}

/// Display label for a stored days string.
///
/// Only the exact canonical Monday-through-Friday string is abbreviated.
pub fn days_label(days: &str) -> &str {
    if days == WEEKDAYS_STRING {
        WEEKDAYS_LABEL
    } else {
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_order_independent() {
        let a = toggle_day(&toggle_day("", Weekday::Martes), Weekday::Lunes);
        let b = toggle_day(&toggle_day("", Weekday::Lunes), Weekday::Martes);
        assert_eq!(a, "Lunes, Martes");
        assert_eq!(a, b);
    }

    #[test]
    fn test_toggle_twice_removes() {
        let mut selection = DaySelection::parse("Lunes, Jueves");
        selection.toggle(Weekday::Jueves);
        assert_eq!(selection.to_days_string(), "Lunes");
        selection.toggle(Weekday::Lunes);
        assert!(selection.is_empty());
        assert_eq!(selection.to_days_string(), "");
    }

    #[test]
    fn test_parse_normalizes_order_and_spacing() {
        let selection = DaySelection::parse("Domingo,Lunes ,  Sábado");
        assert_eq!(selection.to_days_string(), "Lunes, Sábado, Domingo");
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn test_parse_drops_unknown_names() {
        let selection = DaySelection::parse("Lunes, Funday, ");
        assert_eq!(selection.to_days_string(), "Lunes");
    }

    #[test]
    fn test_canonicalization_is_idempotent() {
        let once = DaySelection::parse("Viernes, Lunes, Miércoles").to_days_string();
        let twice = DaySelection::parse(&once).to_days_string();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_days_label() {
        assert_eq!(days_label(WEEKDAYS_STRING), "Lunes a Viernes");
        assert_eq!(days_label("Lunes, Martes"), "Lunes, Martes");
        // Non-canonical spelling of the same set is shown verbatim
        assert_eq!(
            days_label("Martes, Lunes, Miércoles, Jueves, Viernes"),
            "Martes, Lunes, Miércoles, Jueves, Viernes"
        );

        let stored = String::from("Sábado, Domingo");
        assert!(std::ptr::eq(days_label(&stored), stored.as_str()));
    }

    #[test]
    fn test_weekday_names_round_trip() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_name(day.name()), Some(day));
        }
        assert_eq!(Weekday::from_name("Miercoles"), None);
    }
}
