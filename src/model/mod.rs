//! Data models for photoviews.

mod photo;
mod view;

pub use photo::{Orientation, Photo};
pub use view::{View, ViewId};
