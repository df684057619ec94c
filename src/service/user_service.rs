use std::sync::Arc;
use uuid::Uuid;
use chrono::Utc;
use crate::{
    domain::*,
    error::{AppError, Result},
    repository::UserRepository,
};

pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Directory entries must belong to a concrete department.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        if request.department.is_wildcard() {
            return Err(AppError::BadRequest(
                "Users must belong to a specific department".to_string(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: request.name,
            email: request.email,
            role: request.role,
            department: request.department,
            job_title: request.job_title,
            location: request.location,
            phone: None,
            bio: None,
            avatar_url: None,
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        };

        self.repo.create(user).await
    }

    pub async fn update_profile(&self, id: Uuid, request: UpdateProfileRequest) -> Result<User> {
        let mut user = self.find(id).await?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(job_title) = request.job_title {
            user.job_title = Some(job_title);
        }
        if let Some(location) = request.location {
            user.location = Some(location);
        }
        if let Some(phone) = request.phone {
            user.phone = Some(phone);
        }
        if let Some(bio) = request.bio {
            user.bio = Some(bio);
        }
        if let Some(avatar_url) = request.avatar_url {
            user.avatar_url = Some(avatar_url);
        }

        self.repo.update(id, user).await
    }

    pub async fn update_preferences(&self, id: Uuid, request: UpdatePreferencesRequest) -> Result<User> {
        let mut user = self.find(id).await?;
        user.preferences.apply(request);
        self.repo.update(id, user).await
    }

    async fn find(&self, id: Uuid) -> Result<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
