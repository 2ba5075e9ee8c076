mod blob;
mod ids;
mod profile;
mod user;

pub use blob::*;
pub use ids::*;
pub use profile::*;
pub use user::*;
