//! Passive widget surface: timeline computation and the widget-side cache.

mod scheduler;
mod surface;

pub use scheduler::{
    get_timeline, next_local_midnight, Timeline, WidgetEntry, WidgetTimelineScheduler,
};
pub use surface::{SurfaceTimeline, TimelineSource, WidgetSurface, TIMELINE_CACHE_KEY};
