pub mod champion;
pub mod data;
pub mod matchups;
pub mod transform;
