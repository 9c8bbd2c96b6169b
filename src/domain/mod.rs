// Domain layer: page models, the selector subset and the capability ports the
// components are written against.

pub mod model;
pub mod ports;
pub mod selector;
