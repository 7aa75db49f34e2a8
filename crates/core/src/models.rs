pub mod artist;
pub mod genre;
pub mod listing;
pub mod show;
pub mod venue;
