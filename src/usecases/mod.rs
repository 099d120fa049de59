pub mod conversations;
pub mod photos;
pub mod skills;
pub mod users;
pub mod workers;
