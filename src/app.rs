//! Application module: the state shared by the render loop.
//!
//! The `Visualizer` model lives in `app::model` and owns the catalog, the
//! band state, the seek controller and the user's volume.

mod model;

pub use model::*;
