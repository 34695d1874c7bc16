//! Normalization of provider documents into [`CanonicalMatch`] records.
//!
//! Each provider has a fixed table of JSON pointers locating the team names,
//! crests, round, kick-off time, status and score inside one match record.
//! Lookups that miss (absent key, `null`, wrong type) yield `None` for that
//! field instead of failing the record, and records keep the provider's order.

use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::trace;

use crate::{
    mode::ProviderSource,
    types::{CanonicalMatch, RawProviderResult, Score},
};

/// Wire format of provider kick-off timestamps.
pub const KICKOFF_WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Display format of normalized kick-off times.
pub const KICKOFF_DISPLAY_FORMAT: &str = "%A, %d %B %Y %H:%M UTC";

/// JSON pointers locating each canonical field inside one match record.
#[derive(Debug)]
struct FieldTable {
    /// Member of the document holding the match list.
    list: &'static str,
    home_team: &'static str,
    away_team: &'static str,
    home_logo: &'static str,
    away_logo: &'static str,
    matchday: &'static str,
    date: &'static str,
    status: &'static str,
    home_score: &'static str,
    away_score: &'static str,
}

static NULL: Value = Value::Null;

const FOOTBALL_DATA: FieldTable = FieldTable {
    list: "matches",
    home_team: "/homeTeam/name",
    away_team: "/awayTeam/name",
    home_logo: "/homeTeam/crest",
    away_logo: "/awayTeam/crest",
    matchday: "/matchday",
    date: "/utcDate",
    status: "/status",
    home_score: "/score/fullTime/home",
    away_score: "/score/fullTime/away",
};

const API_FOOTBALL: FieldTable = FieldTable {
    list: "response",
    home_team: "/teams/home/name",
    away_team: "/teams/away/name",
    home_logo: "/teams/home/logo",
    away_logo: "/teams/away/logo",
    matchday: "/fixture/round",
    date: "/fixture/date",
    status: "/fixture/status/short",
    home_score: "/goals/home",
    away_score: "/goals/away",
};

// Team pointers are relative to the resolved home/away team object.
const SPORTMONKS: FieldTable = FieldTable {
    list: "data",
    home_team: "/name",
    away_team: "/name",
    home_logo: "/image_path",
    away_logo: "/image_path",
    matchday: "/round/name",
    date: "/starting_at",
    status: "/time/status",
    home_score: "/scores/localteam_score",
    away_score: "/scores/visitorteam_score",
};

/// Normalizes a tagged provider result.
///
/// Returns an empty list if the document has no match list.
#[must_use]
pub fn normalize(result: &RawProviderResult) -> Vec<CanonicalMatch> {
    match result.source {
        ProviderSource::FootballData => normalize_football_data(&result.payload),
        ProviderSource::ApiFootball => normalize_api_football(&result.payload),
        ProviderSource::Sportmonks => normalize_sportmonks(&result.payload),
    }
}

/// Normalizes a document carrying its source tag inline.
///
/// Accepts the shape produced by [`RawProviderResult::into_document`]. A
/// missing or unrecognized tag yields an empty list.
#[must_use]
pub fn normalize_document(document: &Value) -> Vec<CanonicalMatch> {
    let tag = document
        .get(RawProviderResult::SOURCE_KEY)
        .and_then(Value::as_str);
    match tag.and_then(ProviderSource::from_tag) {
        Some(source) => normalize(&RawProviderResult::new(source, document.clone())),
        None => {
            trace!(source = ?tag, "Unrecognized source tag, nothing to normalize");
            Vec::new()
        }
    }
}

/// Normalizes a football-data.org `/competitions/{id}/matches` document.
#[must_use]
pub fn normalize_football_data(document: &Value) -> Vec<CanonicalMatch> {
    records(document, &FOOTBALL_DATA)
        .map(|record| from_table(record, record, record, &FOOTBALL_DATA))
        .collect()
}

/// Normalizes an API-Football `/fixtures` document.
#[must_use]
pub fn normalize_api_football(document: &Value) -> Vec<CanonicalMatch> {
    records(document, &API_FOOTBALL)
        .map(|record| from_table(record, record, record, &API_FOOTBALL))
        .collect()
}

/// Normalizes a SportMonks fixtures or livescores document.
///
/// Teams come from `homeTeam`/`awayTeam` when present, otherwise from the
/// `participants` list.
#[must_use]
pub fn normalize_sportmonks(document: &Value) -> Vec<CanonicalMatch> {
    records(document, &SPORTMONKS)
        .map(|record| {
            let home = sportmonks_team(record, "homeTeam", "home", 0);
            let away = sportmonks_team(record, "awayTeam", "away", 1);
            from_table(record, home, away, &SPORTMONKS)
        })
        .collect()
}

/// Renders a kick-off timestamp for display.
///
/// Timestamps that do not match [`KICKOFF_WIRE_FORMAT`] are returned unchanged.
#[must_use]
pub fn format_kickoff(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, KICKOFF_WIRE_FORMAT)
        .map(|kickoff| kickoff.format(KICKOFF_DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn records<'a>(document: &'a Value, table: &FieldTable) -> impl Iterator<Item = &'a Value> {
    document
        .get(table.list)
        .and_then(Value::as_array)
        .map(|list| list.as_slice())
        .unwrap_or_default()
        .iter()
        .filter(move |record| {
            let keep = record.is_object();
            if !keep {
                trace!(list = table.list, "Skipping non-object match record");
            }
            keep
        })
}

fn from_table(record: &Value, home: &Value, away: &Value, table: &FieldTable) -> CanonicalMatch {
    let team = |side: &Value, pointer| {
        text(side, pointer).unwrap_or_else(|| CanonicalMatch::UNKNOWN_TEAM.to_string())
    };
    CanonicalMatch {
        home_team: team(home, table.home_team),
        away_team: team(away, table.away_team),
        home_logo: text(home, table.home_logo),
        away_logo: text(away, table.away_logo),
        matchday: text(record, table.matchday),
        date: text(record, table.date)
            .filter(|raw| !raw.is_empty())
            .map(|raw| format_kickoff(&raw)),
        status: text(record, table.status),
        score: Score::new(
            goals(record, table.home_score),
            goals(record, table.away_score),
        ),
    }
}

fn sportmonks_team<'a>(record: &'a Value, key: &str, location: &str, index: usize) -> &'a Value {
    if let Some(team) = record
        .get(key)
        .filter(|team| team.as_object().is_some_and(|map| !map.is_empty()))
    {
        return team;
    }
    let Some(participants) = record.get("participants").and_then(Value::as_array) else {
        return &NULL;
    };
    participants
        .iter()
        .find(|p| p.pointer("/meta/location").and_then(Value::as_str) == Some(location))
        .or_else(|| participants.get(index))
        .unwrap_or(&NULL)
}

fn text(value: &Value, pointer: &str) -> Option<String> {
    match value.pointer(pointer)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn goals(value: &Value, pointer: &str) -> Option<u32> {
    match value.pointer(pointer)? {
        Value::Number(n) => n.as_u64().and_then(|g| u32::try_from(g).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_kickoff() {
        assert_eq!(
            format_kickoff("2025-05-10T15:00:00Z"),
            "Saturday, 10 May 2025 15:00 UTC"
        );
        assert_eq!(format_kickoff("not-a-date"), "not-a-date");
        // Offsets are not the wire format and pass through untouched.
        assert_eq!(
            format_kickoff("2025-05-10T15:00:00+00:00"),
            "2025-05-10T15:00:00+00:00"
        );
    }

    #[test]
    fn test_normalize_football_data() {
        let document = json!({
            "matches": [{
                "utcDate": "2025-05-10T15:00:00Z",
                "status": "FINISHED",
                "matchday": 36,
                "homeTeam": { "name": "Arsenal FC", "crest": "https://crests.example/57.png" },
                "awayTeam": { "name": "Chelsea FC" },
                "score": { "fullTime": { "home": 2, "away": 1 } }
            }]
        });
        let result = RawProviderResult::new(ProviderSource::FootballData, document);
        let matches = normalize(&result);

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.home_team, "Arsenal FC");
        assert_eq!(m.away_team, "Chelsea FC");
        assert_eq!(m.home_logo.as_deref(), Some("https://crests.example/57.png"));
        assert_eq!(m.away_logo, None);
        assert_eq!(m.matchday.as_deref(), Some("36"));
        assert_eq!(m.date.as_deref(), Some("Saturday, 10 May 2025 15:00 UTC"));
        assert_eq!(m.status.as_deref(), Some("FINISHED"));
        assert_eq!(m.score, Score::new(Some(2), Some(1)));
    }

    #[test]
    fn test_normalize_football_data_scheduled_has_no_score() {
        let document = json!({
            "matches": [{
                "utcDate": "2025-08-16T11:30:00Z",
                "status": "SCHEDULED",
                "homeTeam": { "name": "Liverpool FC" },
                "awayTeam": { "name": "Everton FC" },
                "score": { "fullTime": { "home": null, "away": null } }
            }]
        });
        let matches = normalize_football_data(&document);
        assert_eq!(matches[0].score, Score::default());
        assert_eq!(matches[0].matchday, None);
    }

    #[test]
    fn test_normalize_api_football() {
        let document = json!({
            "errors": [],
            "response": [{
                "fixture": {
                    "date": "2025-05-10T15:00:00Z",
                    "round": "Regular Season - 36",
                    "status": { "short": "FT", "long": "Match Finished" }
                },
                "teams": {
                    "home": { "name": "Inter", "logo": "https://media.example/505.png" },
                    "away": { "name": "Torino", "logo": "https://media.example/503.png" }
                },
                "goals": { "home": 2, "away": 0 }
            }]
        });
        let result = RawProviderResult::new(ProviderSource::ApiFootball, document);
        let m = &normalize(&result)[0];

        assert_eq!(m.home_team, "Inter");
        assert_eq!(m.away_logo.as_deref(), Some("https://media.example/503.png"));
        assert_eq!(m.matchday.as_deref(), Some("Regular Season - 36"));
        assert_eq!(m.status.as_deref(), Some("FT"));
        assert_eq!(m.date.as_deref(), Some("Saturday, 10 May 2025 15:00 UTC"));
        assert_eq!(m.score, Score::new(Some(2), Some(0)));
    }

    #[test]
    fn test_normalize_sportmonks_participants() {
        let document = json!({
            "data": [{
                "starting_at": "2025-05-10 15:00:00",
                "round": { "name": "35" },
                "participants": [
                    { "name": "Celtic", "image_path": "https://cdn.example/53.png", "meta": { "location": "away" } },
                    { "name": "Rangers", "image_path": "https://cdn.example/62.png", "meta": { "location": "home" } }
                ]
            }]
        });
        let m = &normalize_sportmonks(&document)[0];

        assert_eq!(m.home_team, "Rangers");
        assert_eq!(m.away_team, "Celtic");
        assert_eq!(m.home_logo.as_deref(), Some("https://cdn.example/62.png"));
        assert_eq!(m.matchday.as_deref(), Some("35"));
        // SportMonks timestamps are not in the wire format and pass through.
        assert_eq!(m.date.as_deref(), Some("2025-05-10 15:00:00"));
        assert_eq!(m.status, None);
    }

    #[test]
    fn test_normalize_sportmonks_team_objects_and_scores() {
        let document = json!({
            "data": [{
                "homeTeam": { "name": "Ajax" },
                "awayTeam": {},
                "participants": [{ "name": "Ajax" }, { "name": "PSV" }],
                "time": { "status": "LIVE" },
                "scores": { "localteam_score": "1", "visitorteam_score": 3 }
            }]
        });
        let m = &normalize_sportmonks(&document)[0];

        assert_eq!(m.home_team, "Ajax");
        // An empty team object falls back to the participant list.
        assert_eq!(m.away_team, "PSV");
        assert_eq!(m.status.as_deref(), Some("LIVE"));
        assert_eq!(m.score, Score::new(Some(1), Some(3)));
    }

    #[test]
    fn test_missing_team_names_use_placeholder() {
        let document = json!({ "data": [{ "participants": [] }] });
        let m = &normalize_sportmonks(&document)[0];
        assert_eq!(m.home_team, CanonicalMatch::UNKNOWN_TEAM);
        assert_eq!(m.away_team, CanonicalMatch::UNKNOWN_TEAM);
    }

    #[test]
    fn test_empty_kickoff_is_absent() {
        let document = json!({
            "matches": [{
                "utcDate": "",
                "homeTeam": { "name": "Arsenal FC" },
                "awayTeam": { "name": "Chelsea FC" }
            }]
        });
        let m = &normalize_football_data(&document)[0];
        assert_eq!(m.date, None);
        assert_eq!(m.home_team, "Arsenal FC");
    }

    #[test]
    fn test_missing_list_yields_empty() {
        assert!(normalize_football_data(&json!({ "message": "quota" })).is_empty());
        assert!(normalize_api_football(&json!({ "response": null })).is_empty());
        assert!(normalize_sportmonks(&json!([])).is_empty());
    }

    #[test]
    fn test_order_is_preserved_and_junk_skipped() {
        let document = json!({
            "matches": [
                { "homeTeam": { "name": "B" }, "awayTeam": { "name": "C" } },
                "garbage",
                { "homeTeam": { "name": "A" }, "awayTeam": { "name": "D" } }
            ]
        });
        let homes: Vec<_> = normalize_football_data(&document)
            .into_iter()
            .map(|m| m.home_team)
            .collect();
        assert_eq!(homes, ["B", "A"]);
    }

    #[test]
    fn test_normalize_document_dispatch() {
        let document = json!({
            "source": "api-football",
            "response": [{ "teams": { "home": { "name": "Lens" }, "away": { "name": "Lille" } } }]
        });
        assert_eq!(normalize_document(&document)[0].away_team, "Lille");

        let unknown = json!({ "source": "footystats", "data": [{ "home_name": "X" }] });
        assert!(normalize_document(&unknown).is_empty());
        assert!(normalize_document(&json!({ "matches": [] })).is_empty());
    }
}
