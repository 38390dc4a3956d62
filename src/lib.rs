// Library exports for returnboard

pub mod csv_reader;
pub mod source;
pub mod table;

pub mod series;
pub mod palette;
pub mod figure;
pub mod render;

pub mod scale;
pub mod graph;
pub mod page;
pub mod error;
pub mod server;
