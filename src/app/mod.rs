//! Native GUI on top of [`ViewSession`](crate::session::ViewSession).
//!
//! | Sub-module         | Responsibility |
//! | ------------------ | -------------- |
//! | [`canvas`]         | Painting [`Scene`](crate::plot::Scene)s with egui and turning pointer input into session events |
//! | `lassoplot_app`    | Standalone [`LassoPlotApp`] (eframe) with toolbar and both plots |
//! | `run`              | [`run_lassoplot()`] entry point |

pub mod canvas;
mod lassoplot_app;
mod run;

pub use lassoplot_app::LassoPlotApp;
pub use run::{run_app, run_lassoplot, window_size};
