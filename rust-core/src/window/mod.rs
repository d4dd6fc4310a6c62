//! Frame weighting: classic window functions and DPSS multitapers

pub mod functions;
pub mod taper;
pub mod weighting;

pub use functions::{generate_window, WindowFunction};
pub use taper::{DpssFiles, TaperSet, TaperSource};
pub use weighting::Weighting;
