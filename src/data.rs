pub mod bookmark;
pub mod earnings;
