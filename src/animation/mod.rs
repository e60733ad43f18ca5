mod easing;
mod interpolate;
mod timeline;

pub use easing::Easing;
pub use interpolate::{lerp_toward, Animatable, Smoothed};
pub use timeline::{Stagger, StaggerOrigin, Step, StepPosition, TargetStyles, Timeline};
