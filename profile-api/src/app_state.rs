use std::sync::Arc;

use crate::domain::ports::inbound::{AvatarService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub avatar_service: Arc<dyn AvatarService>,
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    pub fn new(avatar_service: Arc<dyn AvatarService>, user_service: Arc<dyn UserService>) -> Self {
        Self {
            avatar_service,
            user_service,
        }
    }
}
