pub mod calendar;
pub mod scale;
pub mod scene;
pub mod time;
