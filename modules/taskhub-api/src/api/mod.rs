pub mod doc;
pub mod rest;
