use serde_json::Value;

use super::{
    Normalized, body_fields,
    coerce::{Coerced, number_from_f64, to_boolean, to_number},
    fields::{
        CoercedFields, passthrough, text, trimmed_fields, validate_boolean_fields,
        validate_numeric_fields, validate_required_strings,
    },
};
use crate::dao::models::{CyYoungWinner, MvpFinish};

const REQUIRED_STRINGS: &[&str] = &["league", "playerName", "team"];

const OPTIONAL_STRINGS: &[&str] = &["position"];

const NUMERIC_FIELDS: &[&str] = &[
    "wins",
    "losses",
    "era",
    "strikeouts",
    "inningsPitched",
    "saves",
    "war",
    "whip",
    "age",
    "allStarAppearances",
    "careerCyYoungWins",
    "eraPlus",
    "fip",
    "completeGames",
];

const BOOLEAN_FIELDS: &[&str] = &["hallOfFame", "rookieOfTheYear"];

const YEAR_ERROR: &str = "year is required and must be an integer";

/// Sanitize a Cy Young winner payload and collect every validation problem.
pub fn validate_winner(body: &Value) -> Normalized<CyYoungWinner> {
    let body = body_fields(body);
    let strings = trimmed_fields(&body, &[REQUIRED_STRINGS, OPTIONAL_STRINGS].concat());
    let numbers = CoercedFields::coerce(&body, NUMERIC_FIELDS, to_number);
    let flags = CoercedFields::coerce(&body, BOOLEAN_FIELDS, to_boolean);

    let mut errors = Vec::new();
    let year = integer(to_number(body.get("year")));
    if year.is_none() {
        errors.push(YEAR_ERROR.to_owned());
    }
    validate_required_strings(&strings, REQUIRED_STRINGS, &mut errors);
    validate_numeric_fields(&numbers, NUMERIC_FIELDS, &mut errors);
    validate_boolean_fields(&flags, BOOLEAN_FIELDS, &mut errors);

    let required = |field: &str| text(&strings, field).unwrap_or_default();
    let record = CyYoungWinner {
        year: year.unwrap_or_default(),
        league: required("league"),
        player_name: required("playerName"),
        team: required("team"),
        wins: numbers.number("wins"),
        losses: numbers.number("losses"),
        era: numbers.number("era"),
        strikeouts: numbers.number("strikeouts"),
        innings_pitched: numbers.number("inningsPitched"),
        saves: numbers.number("saves"),
        war: numbers.number("war"),
        whip: numbers.number("whip"),
        age: numbers.number("age"),
        position: passthrough(&strings, "position"),
        all_star_appearances: numbers.number("allStarAppearances"),
        other_awards: passthrough(&body, "otherAwards"),
        career_cy_young_wins: numbers.number("careerCyYoungWins"),
        hall_of_fame: flags.value("hallOfFame"),
        rookie_of_the_year: flags.value("rookieOfTheYear"),
        mvp_finish: mvp_finish(body.get("mvpFinish")),
        era_plus: numbers.number("eraPlus"),
        fip: numbers.number("fip"),
        complete_games: numbers.number("completeGames"),
    };

    Normalized { record, errors }
}

fn integer(coerced: Coerced<f64>) -> Option<i32> {
    coerced
        .value()
        .filter(|value| value.fract() == 0.0)
        .filter(|value| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(value))
        .map(|value| value as i32)
}

/// Numbers and numeric strings become placements; anything else is kept as text.
fn mvp_finish(value: Option<&Value>) -> Option<MvpFinish> {
    let to_placement = |raw: &Value| match to_number(Some(raw)) {
        Coerced::Value(number) => number_from_f64(number).map(MvpFinish::Numeric),
        Coerced::Absent | Coerced::Invalid => None,
    };

    match value? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        raw @ (Value::Number(_) | Value::String(_)) => to_placement(raw).or_else(|| match raw {
            Value::String(text) => Some(MvpFinish::Descriptive(text.clone())),
            other => Some(MvpFinish::Descriptive(other.to_string())),
        }),
        other => Some(MvpFinish::Descriptive(other.to_string())),
    }
}
