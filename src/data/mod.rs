pub mod export;
pub mod interval;
pub mod markings;
pub mod model;
pub mod series;
pub mod x_formatter;
