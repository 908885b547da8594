use std::sync::Arc;

use crate::cache::MatchCache;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<MatchCache>,
}

impl AppState {
    pub fn new(cache: MatchCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }
}
