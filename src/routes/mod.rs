pub mod articles;
pub mod checkin;
pub mod files;
pub mod profile;
pub mod test_results;
