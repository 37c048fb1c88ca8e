pub mod prediction_repo;
pub mod profile_repo;
