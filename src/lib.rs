pub mod animation;
pub mod app;
pub mod bus;
pub mod config;
pub mod contact;
pub mod cursor;
pub mod geometry;
pub mod loading;
pub mod overlay;
pub mod scroll;
pub mod sections;
pub mod stage;
pub mod ticker;
pub mod trigger;

pub mod prelude {
    pub use crate::animation::{
        lerp_toward, Animatable, Easing, Smoothed, Stagger, StaggerOrigin, Step, StepPosition,
        TargetStyles, Timeline,
    };
    pub use crate::app::App;
    pub use crate::bus::{TransitionBus, TransitionEvent, TransitionKind};
    pub use crate::config::SiteConfig;
    pub use crate::contact::{ContactForm, FormState};
    pub use crate::cursor::CursorFollower;
    pub use crate::geometry::{Color, Rect, Vec2};
    pub use crate::loading::LoadingSequence;
    pub use crate::overlay::TransitionOverlay;
    pub use crate::scroll::{ScrollConfig, ScrollDirection, ScrollState, SmoothScroll};
    pub use crate::stage::{CursorSurface, ElementId, MemoryStage, MemorySurface, Stage, VisualStyle};
    pub use crate::ticker::{Tick, Ticker, TickerHandle};
    pub use crate::trigger::{
        ThresholdSpec, ToggleAction, ToggleActions, TriggerBuilder, TriggerRegistry,
    };
}
