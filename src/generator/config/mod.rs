pub mod formats;
pub mod group;
pub mod sort;
pub mod subexport;
pub mod userinfo;
