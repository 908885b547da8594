use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{self, HeadToHeadRow};

#[derive(Debug, Deserialize)]
pub struct HeadToHeadParams {
    pub team: Option<String>,
}

pub async fn head_to_head(
    State(state): State<AppState>,
    Query(params): Query<HeadToHeadParams>,
) -> Result<Json<Vec<HeadToHeadRow>>, ApiError> {
    let team = params
        .team
        .ok_or_else(|| ApiError::BadRequest("Missing required parameter: team".to_string()))?;

    let snapshot = state.cache.get_matches().await?;
    let rows = calculate::head_to_head_table(&snapshot.matches, &team);
    tracing::debug!(team = %team, opponents = rows.len(), "Computed head-to-head");

    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use crate::api::routes::test_support::*;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_h2h_endpoint() {
        let tmp = tempfile::tempdir().unwrap();
        let app = setup_test_app(tmp.path(), Some(CSV));

        let (status, json) = get_json(app, "/api/v1/ligue1/h2h?team=Marseille").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([{
                "opponent": "Paris Saint-Germain",
                "mp": 2, "w": 0, "d": 0, "l": 2, "gf": 1, "ga": 5, "gd": -4, "pts": 0
            }])
        );
    }

    #[tokio::test]
    async fn test_h2h_raw_name_query() {
        let tmp = tempfile::tempdir().unwrap();
        let app = setup_test_app(tmp.path(), Some(CSV));

        let (status, json) = get_json(app, "/api/v1/ligue1/h2h?team=AS%20Monaco%20FC").await;
        assert_eq!(status, StatusCode::OK);
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["opponent"], "Lille");
        assert_eq!(rows[0]["pts"], 4);
    }

    #[tokio::test]
    async fn test_h2h_ordering() {
        let tmp = tempfile::tempdir().unwrap();
        let csv = format!("{CSV}FL1,4,FINISHED,Lille OSC,Paris Saint-Germain FC,2,2\n");
        let app = setup_test_app(tmp.path(), Some(&csv));

        let (_, json) = get_json(app, "/api/v1/ligue1/h2h?team=psg%20paris%20saint%20germain").await;
        let opponents: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["opponent"].as_str().unwrap())
            .collect();
        assert_eq!(opponents, vec!["Marseille", "Lille"]);
    }

    #[tokio::test]
    async fn test_h2h_unmatched_and_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let app = setup_test_app(tmp.path(), Some(CSV));

        let (status, json) = get_json(app.clone(), "/api/v1/ligue1/h2h?team=Bordeaux").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));

        let (status, json) = get_json(app, "/api/v1/ligue1/h2h?team=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));
    }

    #[tokio::test]
    async fn test_h2h_missing_param() {
        let tmp = tempfile::tempdir().unwrap();
        let app = setup_test_app(tmp.path(), Some(CSV));

        let (status, json) = get_json(app, "/api/v1/ligue1/h2h").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }
}
