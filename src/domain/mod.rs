// Domain layer: state tree, view models, report and ports.

pub mod model;
pub mod ports;
pub mod report;
pub mod view;
