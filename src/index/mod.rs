pub mod multimap;
pub mod range;
pub mod unique;
