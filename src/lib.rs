pub mod catalog;
pub mod constellation;
pub mod logging;
pub mod watchlist;
