pub mod adjustments;
pub mod target;
pub mod weekdays;
pub mod worked;
pub mod yearly;
