// Domain layer: models, element ids and ports. No HTTP or terminal code here.

pub mod elements;
pub mod model;
pub mod ports;
