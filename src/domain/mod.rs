// Domain layer: employee records, rejection taxonomy and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod rejection;
