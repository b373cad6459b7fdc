pub mod geocode;
pub mod route;
pub mod url;
