use std::sync::Arc;

use crate::core::error::Result;
use crate::features::users::dtos::UserResponseDto;
use crate::modules::storage::Storage;

/// Service for the user directory
pub struct UserService {
    storage: Arc<dyn Storage>,
}

impl UserService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// List every user, unfiltered
    pub async fn list(&self) -> Result<Vec<UserResponseDto>> {
        let users = self.storage.list_users().await?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }
}
