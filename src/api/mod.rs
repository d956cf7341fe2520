pub mod dashboard;
pub mod presence;
pub mod users;
