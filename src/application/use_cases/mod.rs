pub mod stars;
pub mod tags;
