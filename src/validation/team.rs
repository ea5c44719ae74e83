use serde_json::Value;

use super::{
    Normalized, body_fields,
    coerce::to_number,
    fields::{
        CoercedFields, passthrough, text, trimmed_fields, validate_numeric_fields,
        validate_required_strings,
    },
};
use crate::dao::models::Team;

const REQUIRED_STRINGS: &[&str] = &["teamName", "city", "league", "division"];

const OPTIONAL_STRINGS: &[&str] = &[
    "nickname",
    "state",
    "stadium",
    "currentManager",
    "primaryColor",
    "secondaryColor",
    "website",
    "twitter",
    "owner",
    "mascot",
];

const NUMERIC_FIELDS: &[&str] = &[
    "founded",
    "worldSeriesWins",
    "ballparkCapacity",
    "firstSeason",
    "franchiseValue",
    "payroll",
    "divisionTitles",
    "pennantWins",
];

/// Sanitize a team payload and collect every validation problem.
pub fn validate_team(body: &Value) -> Normalized<Team> {
    let body = body_fields(body);
    let strings = trimmed_fields(&body, &[REQUIRED_STRINGS, OPTIONAL_STRINGS].concat());
    let numbers = CoercedFields::coerce(&body, NUMERIC_FIELDS, to_number);

    let mut errors = Vec::new();
    validate_required_strings(&strings, REQUIRED_STRINGS, &mut errors);
    validate_numeric_fields(&numbers, NUMERIC_FIELDS, &mut errors);

    let required = |field: &str| text(&strings, field).unwrap_or_default();
    let record = Team {
        team_name: required("teamName"),
        nickname: passthrough(&strings, "nickname"),
        city: required("city"),
        state: passthrough(&strings, "state"),
        stadium: passthrough(&strings, "stadium"),
        founded: numbers.number("founded"),
        league: required("league"),
        division: required("division"),
        world_series_wins: numbers.number("worldSeriesWins"),
        current_manager: passthrough(&strings, "currentManager"),
        primary_color: passthrough(&strings, "primaryColor"),
        secondary_color: passthrough(&strings, "secondaryColor"),
        website: passthrough(&strings, "website"),
        twitter: passthrough(&strings, "twitter"),
        ballpark_capacity: numbers.number("ballparkCapacity"),
        owner: passthrough(&strings, "owner"),
        mascot: passthrough(&strings, "mascot"),
        first_season: numbers.number("firstSeason"),
        franchise_value: numbers.number("franchiseValue"),
        payroll: numbers.number("payroll"),
        division_titles: numbers.number("divisionTitles"),
        pennant_wins: numbers.number("pennantWins"),
    };

    Normalized { record, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Number, json};

    #[test]
    fn trims_required_strings() {
        let normalized = validate_team(&json!({
            "teamName": "  Red Sox  ",
            "city": "Boston",
            "league": "AL",
            "division": " East"
        }));

        assert!(normalized.is_valid(), "{:?}", normalized.errors);
        assert_eq!(normalized.record.team_name, "Red Sox");
        assert_eq!(normalized.record.division, "East");
        assert_eq!(normalized.record.nickname, None);
    }

    #[test]
    fn coerces_numeric_strings() {
        let normalized = validate_team(&json!({
            "teamName": "Cubs",
            "city": "Chicago",
            "league": "NL",
            "division": "Central",
            "founded": "1876",
            "worldSeriesWins": 3,
            "payroll": "227.5",
            "ballparkCapacity": ""
        }));

        let team = normalized.into_result().unwrap();
        assert_eq!(team.founded, Some(Number::from(1876)));
        assert_eq!(team.world_series_wins, Some(Number::from(3)));
        assert_eq!(team.payroll.and_then(|n| n.as_f64()), Some(227.5));
        assert_eq!(team.ballpark_capacity, None);
    }

    #[test]
    fn aggregates_every_problem() {
        let normalized = validate_team(&json!({
            "teamName": "   ",
            "league": 7,
            "division": "West",
            "founded": "long ago",
            "payroll": "lots",
            "mascot": false
        }));

        assert_eq!(
            normalized.errors,
            vec![
                "teamName is required and must be a non-empty string",
                "city is required and must be a non-empty string",
                "league is required and must be a non-empty string",
                "founded must be a valid number",
                "payroll must be a valid number",
            ]
        );
    }

    #[test]
    fn optional_text_fields_pass_through_other_types() {
        let normalized = validate_team(&json!({
            "teamName": "Red Sox",
            "city": "Boston",
            "league": "AL",
            "division": "East",
            "nickname": 7,
            "mascot": false,
            "stadium": "  Fenway Park ",
            "owner": null
        }));

        let team = normalized.into_result().unwrap();
        assert_eq!(team.nickname, Some(json!(7)));
        assert_eq!(team.mascot, Some(json!(false)));
        assert_eq!(team.stadium, Some(json!("Fenway Park")));
        assert_eq!(team.owner, None);
    }

    #[test]
    fn whitespace_only_number_is_invalid() {
        let normalized = validate_team(&json!({
            "teamName": "Red Sox",
            "city": "Boston",
            "league": "AL",
            "division": "East",
            "payroll": "   "
        }));

        assert_eq!(normalized.errors, vec!["payroll must be a valid number"]);
    }

    #[test]
    fn non_object_body_reports_all_required_fields() {
        let normalized = validate_team(&json!(["teamName"]));
        assert_eq!(normalized.errors.len(), REQUIRED_STRINGS.len());
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let normalized = validate_team(&json!({
            "teamName": "Mets",
            "city": "New York",
            "league": "NL",
            "division": "East",
            "isAdmin": true
        }));

        let stored = serde_json::to_value(normalized.record).unwrap();
        assert_eq!(
            stored,
            json!({"teamName": "Mets", "city": "New York", "league": "NL", "division": "East"})
        );
    }
}
