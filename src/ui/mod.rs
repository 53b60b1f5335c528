pub mod about;
pub mod map;
pub mod panels;
pub mod plots;
