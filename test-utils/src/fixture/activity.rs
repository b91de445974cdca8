use chrono::{DateTime, Utc};

/// Unsaved activity model running over `[start_at, end_at]`.
pub fn activity(
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    active: bool,
) -> entity::activity::Model {
    entity::activity::Model {
        id: 1,
        title: "Spring market".to_string(),
        description: None,
        location: None,
        image_url: None,
        start_at,
        end_at,
        active,
        created_at: start_at,
        updated_at: start_at,
    }
}
