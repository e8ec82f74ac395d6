//! Achievement catalogue handler

use axum::Json;

use crate::domain::entities::{catalogue, AchievementInfo};

/// GET /achievements
pub async fn list_achievements() -> Json<Vec<AchievementInfo>> {
    Json(catalogue())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn catalogue_lists_every_badge_by_code() {
        let Json(entries) = list_achievements().await;
        assert_eq!(entries.len(), 29);

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Warming Up");
    }
}
