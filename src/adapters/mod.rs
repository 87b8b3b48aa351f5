// Adapters layer: concrete cloud providers behind the `CloudProvider` port.

pub mod aws;
pub mod simulated;
