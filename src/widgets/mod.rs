//! Interactive components of the dashboard.
//!
//! Each component is a pure function from its widget inputs to a scene
//! description plus a caption.

pub mod geoid;
pub mod grid;
pub mod projection;
pub mod scale;
pub mod coords;
pub mod timezone;

use crate::scene::types::*;


pub trait Component {
    /// Widget values the component reads
    type Input;

    /// Name used for output files and logs
    const NAME: &'static str;

    /// Recomputes the figure and caption
    fn compute(input: Self::Input) -> Computation;

    /// `compute` as driven by a user interaction, logged per component
    fn recompute(input: Self::Input) -> (&'static str, Computation) {
        tracing::debug!(component = Self::NAME, "recomputed");
        (Self::NAME, Self::compute(input))
    }
}
