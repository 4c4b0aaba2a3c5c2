// Domain layer: batch models and the remote role port.

pub mod model;
pub mod ports;
