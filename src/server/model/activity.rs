use chrono::{DateTime, Utc};

use crate::model::activity::{ActivityDto, ActivityStatus, CreateActivityDto, UpdateActivityDto};

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Activity {
    pub fn from_entity(entity: entity::activity::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            location: entity.location,
            image_url: entity.image_url,
            start_at: entity.start_at,
            end_at: entity.end_at,
            active: entity.active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn status(&self, now: DateTime<Utc>) -> ActivityStatus {
        if !self.active {
            ActivityStatus::Disabled
        } else if now < self.start_at {
            ActivityStatus::Upcoming
        } else if now > self.end_at {
            ActivityStatus::Ended
        } else {
            ActivityStatus::Ongoing
        }
    }

    pub fn into_dto(self, now: DateTime<Utc>) -> ActivityDto {
        let status = self.status(now);

        ActivityDto {
            id: self.id,
            title: self.title,
            description: self.description,
            location: self.location,
            image_url: self.image_url,
            start_at: self.start_at,
            end_at: self.end_at,
            active: self.active,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityFields {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub active: bool,
}

impl ActivityFields {
    pub fn from_dto(dto: CreateActivityDto) -> Self {
        Self {
            title: dto.title.trim().to_string(),
            description: dto.description,
            location: dto.location,
            image_url: dto.image_url,
            start_at: dto.start_at,
            end_at: dto.end_at,
            active: dto.active,
        }
    }

    /// Applies a partial update on top of the stored activity.
    pub fn merged(activity: &Activity, dto: UpdateActivityDto) -> Self {
        Self {
            title: dto
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| activity.title.clone()),
            description: dto.description.or_else(|| activity.description.clone()),
            location: dto.location.or_else(|| activity.location.clone()),
            image_url: dto.image_url.or_else(|| activity.image_url.clone()),
            start_at: dto.start_at.unwrap_or(activity.start_at),
            end_at: dto.end_at.unwrap_or(activity.end_at),
            active: dto.active.unwrap_or(activity.active),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("Title must not be empty".to_string());
        }
        if self.end_at <= self.start_at {
            return Err("end_at must be after start_at".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use chrono::Duration;
    use test_utils::fixture::activity::activity;

    use super::*;

    #[test]
    fn status_by_window() {
        let now = Utc::now();
        let day = Duration::days(1);

        let cases = [
            (activity(now - day, now + day, false), ActivityStatus::Disabled),
            (activity(now + day, now + day * 2, true), ActivityStatus::Upcoming),
            (activity(now - day * 2, now - day, true), ActivityStatus::Ended),
            (activity(now - day, now + day, true), ActivityStatus::Ongoing),
            (activity(now, now + day, true), ActivityStatus::Ongoing),
        ];

        for (model, expected) in cases {
            assert_eq!(Activity::from_entity(model).status(now), expected);
        }
    }

    #[test]
    fn rejects_inverted_window() {
        let now = Utc::now();
        let stored = Activity::from_entity(activity(now, now + Duration::hours(2), true));

        let fields = ActivityFields::merged(
            &stored,
            UpdateActivityDto {
                end_at: Some(now - Duration::hours(1)),
                ..Default::default()
            },
        );

        assert!(fields.validate().is_err());
    }
}
