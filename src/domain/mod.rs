// Domain layer: core models and ports (interfaces). No storage or transport details.

pub mod model;
pub mod ports;
