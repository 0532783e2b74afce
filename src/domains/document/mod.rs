pub mod model;
pub mod rest;
