//! Domain value types: instants, bodies, signs, aspects and coordinates.

pub mod aspect;
pub mod geo;
pub mod time;
pub mod zodiac;

pub use aspect::{angular_separation, Aspect, AspectKind, AspectRule, AspectTable};
pub use geo::{GeoCoordinate, GeoLocation};
pub use time::JulianDay;
pub use zodiac::{degree_to_sign, Body, BodyPosition, SignLocale, SignPlacement, ZodiacSign};
