// Domain layer: inventory models and the ports the stages depend on.

pub mod model;
pub mod ports;
