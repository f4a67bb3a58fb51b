// Domain layer: core models and ports (interfaces). No serial or filesystem code here.

pub mod model;
pub mod ports;
