use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Number, Value};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::dao::record_id::RecordId;

/// Document kinds persisted in their own collection.
pub trait Entity:
    Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + Unpin + 'static
{
    /// Collection holding the documents.
    const COLLECTION: &'static str;
    /// Singular label used in client facing messages (e.g. "team").
    const LABEL: &'static str;
    /// Plural label used in client facing messages (e.g. "teams").
    const PLURAL: &'static str;
}

/// Stored document together with its storage-assigned identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Record<T> {
    /// Identifier generated on insert.
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "5f8d0d55b54764421b7156c9")]
    pub id: RecordId,
    /// Sanitized document body.
    #[serde(flatten)]
    pub entity: T,
}

/// Major League Baseball franchise.
///
/// Optional text fields hold whatever JSON the client sent, with strings trimmed.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Team {
    /// Franchise name, e.g. "Red Sox".
    pub team_name: String,
    /// Informal name.
    #[schema(value_type = Option<String>)]
    pub nickname: Option<Value>,
    /// Home city.
    pub city: String,
    /// Home state or province.
    #[schema(value_type = Option<String>)]
    pub state: Option<Value>,
    /// Home ballpark.
    #[schema(value_type = Option<String>)]
    pub stadium: Option<Value>,
    /// Year the franchise was founded.
    #[schema(value_type = Option<f64>)]
    pub founded: Option<Number>,
    /// "AL" or "NL".
    pub league: String,
    /// Division within the league.
    pub division: String,
    /// World Series titles.
    #[schema(value_type = Option<f64>)]
    pub world_series_wins: Option<Number>,
    /// Current manager.
    #[schema(value_type = Option<String>)]
    pub current_manager: Option<Value>,
    /// Primary team color.
    #[schema(value_type = Option<String>)]
    pub primary_color: Option<Value>,
    /// Secondary team color.
    #[schema(value_type = Option<String>)]
    pub secondary_color: Option<Value>,
    /// Official website.
    #[schema(value_type = Option<String>)]
    pub website: Option<Value>,
    /// Twitter handle.
    #[schema(value_type = Option<String>)]
    pub twitter: Option<Value>,
    /// Seating capacity of the home ballpark.
    #[schema(value_type = Option<f64>)]
    pub ballpark_capacity: Option<Number>,
    /// Principal owner.
    #[schema(value_type = Option<String>)]
    pub owner: Option<Value>,
    /// Team mascot.
    #[schema(value_type = Option<String>)]
    pub mascot: Option<Value>,
    /// First season played.
    #[schema(value_type = Option<f64>)]
    pub first_season: Option<Number>,
    /// Estimated franchise value.
    #[schema(value_type = Option<f64>)]
    pub franchise_value: Option<Number>,
    /// Current payroll.
    #[schema(value_type = Option<f64>)]
    pub payroll: Option<Number>,
    /// Division titles won.
    #[schema(value_type = Option<f64>)]
    pub division_titles: Option<Number>,
    /// League pennants won.
    #[schema(value_type = Option<f64>)]
    pub pennant_wins: Option<Number>,
}

impl Entity for Team {
    const COLLECTION: &'static str = "teams";
    const LABEL: &'static str = "team";
    const PLURAL: &'static str = "teams";
}

/// MVP voting result: a placement number or a free-form description such as "2nd place".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MvpFinish {
    /// Finishing position in the vote.
    Numeric(Number),
    /// Text kept as sent.
    Descriptive(String),
}

/// Cy Young award winner for one league and season.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CyYoungWinner {
    /// Season of the award.
    pub year: i32,
    /// "AL" or "NL".
    pub league: String,
    /// Pitcher's name.
    pub player_name: String,
    /// Team the pitcher played for that season.
    pub team: String,
    /// Wins.
    #[schema(value_type = Option<f64>)]
    pub wins: Option<Number>,
    /// Losses.
    #[schema(value_type = Option<f64>)]
    pub losses: Option<Number>,
    /// Earned run average.
    #[schema(value_type = Option<f64>)]
    pub era: Option<Number>,
    /// Strikeouts.
    #[schema(value_type = Option<f64>)]
    pub strikeouts: Option<Number>,
    /// Innings pitched.
    #[schema(value_type = Option<f64>)]
    pub innings_pitched: Option<Number>,
    /// Saves.
    #[schema(value_type = Option<f64>)]
    pub saves: Option<Number>,
    /// Wins above replacement.
    #[schema(value_type = Option<f64>)]
    pub war: Option<Number>,
    /// Walks plus hits per inning pitched.
    #[schema(value_type = Option<f64>)]
    pub whip: Option<Number>,
    /// Age during the season.
    #[schema(value_type = Option<f64>)]
    pub age: Option<Number>,
    /// Pitching role; any JSON value, strings trimmed.
    #[schema(value_type = Option<String>)]
    pub position: Option<Value>,
    /// All-Star selections.
    #[schema(value_type = Option<f64>)]
    pub all_star_appearances: Option<Number>,
    /// Other awards, usually a string or a list; stored exactly as sent.
    #[schema(value_type = Option<Object>)]
    pub other_awards: Option<Value>,
    /// Career Cy Young awards.
    #[schema(value_type = Option<f64>)]
    pub career_cy_young_wins: Option<Number>,
    /// Hall of Fame inductee.
    pub hall_of_fame: Option<bool>,
    /// Also won Rookie of the Year.
    pub rookie_of_the_year: Option<bool>,
    /// Placement number or description such as "2nd place".
    #[schema(value_type = Option<Object>)]
    pub mvp_finish: Option<MvpFinish>,
    /// Adjusted ERA.
    #[schema(value_type = Option<f64>)]
    pub era_plus: Option<Number>,
    /// Fielding independent pitching.
    #[schema(value_type = Option<f64>)]
    pub fip: Option<Number>,
    /// Complete games.
    #[schema(value_type = Option<f64>)]
    pub complete_games: Option<Number>,
}

impl Entity for CyYoungWinner {
    const COLLECTION: &'static str = "cy_young_winners";
    const LABEL: &'static str = "Cy Young winner";
    const PLURAL: &'static str = "Cy Young winners";
}
