use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, N3, P1, Z0},
};

/// Heat released per unit of room volume, W/m³ in SI.
pub type VolumetricPowerDensity = Quantity<ISQ<N1, P1, N3, Z0, Z0, Z0, Z0>, SI<f64>, f64>;
