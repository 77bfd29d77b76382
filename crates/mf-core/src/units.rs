// mf-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Force as UomForce, Length as UomLength, Mass as UomMass,
    MassDensity as UomMassDensity, Power as UomPower, Pressure as UomPressure,
    Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Density = UomMassDensity;
pub type Force = UomForce;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Velocity = UomVelocity;

#[inline]
pub fn n(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

pub mod constants {
    /// Specific tension of mammalian skeletal muscle (Pa).
    pub const SPECIFIC_TENSION_PA: f64 = 0.25e6;
    /// Density of mammalian skeletal muscle (kg/m^3).
    pub const MUSCLE_DENSITY_KG_PER_M3: f64 = 1059.7;
}
