pub mod math;
pub mod time;

pub use math::{inverse_lerp, lerp, quadratic_bezier, Point3};
pub use time::{HostClock, TickClock, TimeBase};
