//! # geoconcepts
//!
//! Computations behind an educational geography dashboard: Earth shape,
//! map projections, map scale, geographic coordinates and time zones.
//! Every interaction maps a few widget values to a declarative scene and a
//! caption; scenes are written as X3D or JSON for an external renderer.

pub mod common;
pub mod scene;
pub mod session;
pub mod widgets;
pub mod dashboard;
