use uom::si::{
    f64::{Length, Power, ThermodynamicTemperature},
    length::meter,
    power::kilowatt,
    thermodynamic_temperature::degree_celsius,
};

use super::params::{
    AirHandling, HeatRecovery, LiquidCooling, ParameterSet, RackConfig, RoomGeometry, Temperatures,
};

pub(crate) fn celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}

/// A 15 × 10 × 3 m room with 60 racks at 40 kW, 20 % DCLC, 90 % RDHX,
/// two 155,000 CFM handlers, and a 23.3 °C supply.
pub(crate) fn baseline() -> ParameterSet {
    baseline_with_inlet(23.3)
}

pub(crate) fn baseline_with_inlet(inlet_c: f64) -> ParameterSet {
    ParameterSet {
        room: RoomGeometry::new(
            Length::new::<meter>(15.0),
            Length::new::<meter>(10.0),
            Length::new::<meter>(3.0),
        )
        .unwrap(),
        racks: RackConfig::in_rows(3, 20, Power::new::<kilowatt>(40.0)).unwrap(),
        liquid: LiquidCooling::new(0.2, 0.9).unwrap(),
        recovery: HeatRecovery::new(0, Power::new::<kilowatt>(60.0)).unwrap(),
        air: AirHandling::new(2, 155_000.0).unwrap(),
        temperatures: Temperatures::new(celsius(inlet_c), celsius(30.0)).unwrap(),
    }
}
