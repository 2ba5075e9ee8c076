mod avatar;
mod user;
mod user_locks;

pub use avatar::AvatarServiceImpl;
pub use user::UserServiceImpl;
pub use user_locks::{UserLockGuard, UserLocks};
