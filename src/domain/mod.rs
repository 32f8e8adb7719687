// Domain layer: metadata and output models plus the ports the generator is written against.

pub mod model;
pub mod ports;
