//! Data model and the pure computations behind the two plots.

pub mod dataset;
pub mod lasso;
pub mod projection;
pub mod selection;
pub mod zoom;
