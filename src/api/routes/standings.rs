use axum::extract::State;
use axum::Json;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{self, StandingRow, HOME_AWAY_COLUMNS, OVERALL_COLUMNS};

/// A table as columns plus rows of column → value cells.
#[derive(Debug, Serialize)]
pub struct LeagueTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<TableRow>,
}

/// One table row; serializes as `{"values": {column: cell, ...}}` in column order.
#[derive(Debug)]
pub struct TableRow {
    columns: &'static [&'static str],
    cells: Vec<String>,
}

#[cfg(test)]
impl TableRow {
    fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| *c == column)
            .and_then(|i| self.cells.get(i))
            .map(String::as_str)
    }
}

struct RowValues<'a>(&'a TableRow);

impl Serialize for RowValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.cells.len()))?;
        for (column, cell) in self.0.columns.iter().zip(&self.0.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

impl Serialize for TableRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut row = serializer.serialize_struct("TableRow", 1)?;
        row.serialize_field("values", &RowValues(self))?;
        row.end()
    }
}

impl LeagueTable {
    fn build(
        columns: &'static [&'static str],
        rows: &[StandingRow],
        cells: impl Fn(&StandingRow) -> Vec<String>,
    ) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: rows
                .iter()
                .map(|r| TableRow {
                    columns,
                    cells: cells(r),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsResponse {
    pub overall: LeagueTable,
    pub home_away: LeagueTable,
}

impl StandingsResponse {
    pub fn from_rows(rows: &[StandingRow]) -> Self {
        Self {
            overall: LeagueTable::build(&OVERALL_COLUMNS, rows, StandingRow::overall_cells),
            home_away: LeagueTable::build(&HOME_AWAY_COLUMNS, rows, StandingRow::home_away_cells),
        }
    }
}

pub async fn standings(State(state): State<AppState>) -> Result<Json<StandingsResponse>, ApiError> {
    let snapshot = state.cache.get_matches().await?;
    let rows = calculate::standings(&snapshot.matches);
    tracing::debug!(teams = rows.len(), "Computed standings");
    Ok(Json(StandingsResponse::from_rows(&rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_support::*;
    use crate::models::MatchRecord;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_table_row_lookup() {
        let rows = calculate::standings(&[MatchRecord::new("Lens", "Nice", 1, 0)]);
        let response = StandingsResponse::from_rows(&rows);
        let first = &response.overall.rows[0];
        assert_eq!(first.get("Squad"), Some("Lens"));
        assert_eq!(first.get("Pts/MP"), Some("3.00"));
        assert_eq!(first.get("Home Pts"), None);
        assert_eq!(response.home_away.rows[1].get("Away L"), Some("1"));
    }

    #[tokio::test]
    async fn test_standings_endpoint() {
        let tmp = tempfile::tempdir().unwrap();
        let app = setup_test_app(tmp.path(), Some(CSV));

        let (status, json) = get_json(app, "/api/v1/ligue1/standings").await;
        assert_eq!(status, StatusCode::OK);

        let overall = &json["overall"];
        assert_eq!(overall["columns"].as_array().unwrap().len(), 11);
        assert_eq!(overall["rows"].as_array().unwrap().len(), 4);
        assert_eq!(
            overall["rows"][0]["values"],
            json!({
                "Rk": "1", "Squad": "Paris Saint-Germain", "MP": "2", "W": "2", "D": "0",
                "L": "0", "GF": "5", "GA": "1", "GD": "4", "Pts": "6", "Pts/MP": "3.00"
            })
        );

        let squads: Vec<&str> = overall["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["values"]["Squad"].as_str().unwrap())
            .collect();
        assert_eq!(squads, vec!["Paris Saint-Germain", "Monaco", "Lille", "Marseille"]);

        let home_away = &json["homeAway"];
        assert_eq!(home_away["columns"].as_array().unwrap().len(), 18);
        assert_eq!(home_away["rows"][1]["values"]["Squad"], "Monaco");
        assert_eq!(home_away["rows"][1]["values"]["Home Pts"], "1");
        assert_eq!(home_away["rows"][1]["values"]["Away Pts"], "3");
    }

    #[tokio::test]
    async fn test_standings_header_only() {
        let tmp = tempfile::tempdir().unwrap();
        let app = setup_test_app(
            tmp.path(),
            Some("competition_code,home_team,away_team,fulltime_home,fulltime_away\n"),
        );

        let (status, json) = get_json(app, "/api/v1/ligue1/standings").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["overall"]["rows"].as_array().unwrap().is_empty());
        assert!(json["homeAway"]["rows"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_standings_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let app = setup_test_app(tmp.path(), None);

        let (status, json) = get_json(app, "/api/v1/ligue1/standings").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"]["code"], "NO_DATA");
    }

    #[tokio::test]
    async fn test_standings_missing_columns() {
        let tmp = tempfile::tempdir().unwrap();
        let app = setup_test_app(tmp.path(), Some("home_team,away_team\nLens,Nice\n"));

        let (status, json) = get_json(app, "/api/v1/ligue1/standings").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    }
}
