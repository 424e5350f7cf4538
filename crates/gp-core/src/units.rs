// gp-core/src/units.rs
//
// Solver results arrive in millimetres; reports use micrometres. The helpers
// below route the conversions through uom so the scale factors live in one place.

use uom::si::f64::{Angle as UomAngle, Length as UomLength};

pub type Angle = UomAngle;
pub type Length = UomLength;

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

/// Millimetres to micrometres.
#[inline]
pub fn mm_to_um(v: f64) -> f64 {
    use uom::si::length::micrometer;
    mm(v).get::<micrometer>()
}

/// Radial deviation in millimetres to diametral deviation in micrometres.
#[inline]
pub fn radial_mm_to_diametral_um(v: f64) -> f64 {
    2.0 * mm_to_um(v)
}

#[inline]
pub fn deg_to_rad(v: f64) -> f64 {
    use uom::si::angle::radian;
    deg(v).get::<radian>()
}

#[inline]
pub fn rad_to_deg(v: f64) -> f64 {
    use uom::si::angle::degree;
    rad(v).get::<degree>()
}
