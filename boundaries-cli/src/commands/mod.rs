pub mod batch;
pub mod catalog;
pub mod links;
pub mod overpass;
