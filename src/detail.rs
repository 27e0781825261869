//! Detail panel text for the highlighted tournament.

use crate::utils::format_thousands;
use crate::Record;

/// Display strings for the detail panel slots.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DisplayFields {
    pub title: String,
    pub winner: String,
    pub goals: String,
    pub average_goals: String,
    pub matches: String,
    pub teams: String,
    pub average_attendance: String,
}

pub fn render(record: &Record) -> DisplayFields {
    DisplayFields {
        title: format!("{} World Cup {}", record.year, record.location),
        winner: record.winner.clone(),
        goals: format_thousands(u64::from(record.goal_count)),
        average_goals: format!("{:.2}", record.average_goals),
        matches: record.match_count.to_string(),
        teams: record.team_count.to_string(),
        average_attendance: format_thousands(u64::from(record.average_attendance)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_every_slot() {
        let record = Record {
            year: 1994,
            location: "USA".to_string(),
            winner: "Brazil".to_string(),
            team_count: 24,
            match_count: 52,
            goal_count: 1160,
            average_goals: 2.7,
            average_attendance: 68_991,
        };
        let fields = render(&record);
        assert_eq!(fields.title, "1994 World Cup USA");
        assert_eq!(fields.winner, "Brazil");
        assert_eq!(fields.goals, "1,160");
        assert_eq!(fields.average_goals, "2.70");
        assert_eq!(fields.matches, "52");
        assert_eq!(fields.teams, "24");
        assert_eq!(fields.average_attendance, "68,991");
    }
}
