pub mod h2h;
pub mod standings;

use axum::Json;
use serde::Serialize;

use crate::api::ApiError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("No such route".to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::cache::{MatchCache, DEFAULT_TTL};
    use crate::parse::ParseOptions;
    use crate::source::{CsvFileSource, DataLocation};

    pub const CSV: &str = "\
competition_code,matchday,status,home_team,away_team,fulltime_home,fulltime_away
FL1,1,FINISHED,Paris Saint-Germain FC,Olympique de Marseille,3,1
FL1,1,FINISHED,AS Monaco FC,Lille OSC,1,1
FL1,2,FINISHED,Olympique de Marseille,Paris Saint-Germain FC,0,2
FL1,2,FINISHED,Lille OSC,AS Monaco FC,0,2
FL1,3,FINISHED,Paris Saint-Germain FC,AS Monaco FC,N/A,1
FL1,3,SCHEDULED,AS Monaco FC,Olympique de Marseille,,
PL,1,FINISHED,Arsenal FC,Chelsea FC,5,0
";

    pub fn setup_test_app(dir: &std::path::Path, csv: Option<&str>) -> axum::Router {
        if let Some(csv) = csv {
            std::fs::write(dir.join("matches.csv"), csv).unwrap();
        }
        let source = CsvFileSource::new(
            DataLocation {
                file_name: "matches.csv".to_string(),
                path: None,
                start_dir: dir.to_path_buf(),
                search_depth: 0,
            },
            ParseOptions::default(),
        );
        let state = AppState::new(MatchCache::new(Arc::new(source), DEFAULT_TTL));
        build_router(state, "*")
    }

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        let app = setup_test_app(tmp.path(), None);
        let (status, json) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let tmp = tempfile::tempdir().unwrap();
        let app = setup_test_app(tmp.path(), None);
        let (status, json) = get_json(app, "/api/v1/ligue1/scorers").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }
}
