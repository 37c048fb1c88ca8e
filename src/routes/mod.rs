pub mod numerology;
pub mod ping;
pub mod profile;
