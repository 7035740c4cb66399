//! Validated facility inputs.
//!
//! A [`ParameterSet`] is assembled from independently validated groups so
//! each group can reject bad input with a precise [`ParameterError`].
//! Once built, every invariant the calculators rely on holds: finite positive
//! room dimensions and volume, finite positive rack power and per-handler
//! airflow, effectiveness in [0, 1], and finite non-negative heat-exchanger
//! capacity. Group totals stay finite too.

mod error;

pub use error::{Dimension, ParameterError};

use std::ops::Deref;

use uom::si::{
    f64::{Area, Length, Power, Ratio, ThermodynamicTemperature, Volume},
    length::meter,
    power::watt,
    ratio::ratio,
    thermodynamic_temperature::kelvin,
    volume::cubic_meter,
};

use crate::support::{
    constraint::{
        Constrained, ConstraintError, ConstraintResult, NonNegative, StrictlyPositive,
        UnitInterval,
    },
    units::Cfm,
};

use super::stages::CaptureStage;

/// Default number of rack rows when only a rack count is given.
pub const DEFAULT_RACK_ROWS: u32 = 3;

/// Rejects magnitudes that overflowed to infinity.
///
/// `NaN` and sign violations are left to the constraint checked first.
fn finite(value: f64) -> ConstraintResult<f64> {
    if value.is_infinite() {
        Err(ConstraintError::AboveMaximum)
    } else {
        Ok(value)
    }
}

/// Room footprint and ceiling height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomGeometry {
    length: Length,
    width: Length,
    height: Length,
}

impl RoomGeometry {
    /// Constructs a validated room geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidGeometry`] if any dimension is not
    /// strictly positive and finite, or if their product overflows or
    /// underflows to zero.
    pub fn new(length: Length, width: Length, height: Length) -> Result<Self, ParameterError> {
        let check = |dimension, value| {
            Constrained::<Length, StrictlyPositive>::new(value)
                .map(Constrained::into_inner)
                .and_then(|value| finite(value.get::<meter>()).map(|_| value))
                .map_err(|source| ParameterError::InvalidGeometry { dimension, source })
        };

        let room = Self {
            length: check(Dimension::Length, length)?,
            width: check(Dimension::Width, width)?,
            height: check(Dimension::Height, height)?,
        };

        StrictlyPositive::new(room.volume().get::<cubic_meter>())
            .map(Constrained::into_inner)
            .and_then(finite)
            .map_err(|source| ParameterError::InvalidGeometry {
                dimension: Dimension::Volume,
                source,
            })?;

        Ok(room)
    }

    /// Room extent along the rack rows.
    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }

    /// Room extent across the rack rows.
    #[must_use]
    pub fn width(&self) -> Length {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> Length {
        self.height
    }

    #[must_use]
    pub fn floor_area(&self) -> Area {
        self.length * self.width
    }

    /// Air volume of the room. Always strictly positive.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.length * self.width * self.height
    }
}

/// Rack count, row layout, and per-rack IT power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RackConfig {
    count: u32,
    rows: u32,
    power_per_rack: Power,
}

impl RackConfig {
    /// Constructs a rack configuration laid out in [`DEFAULT_RACK_ROWS`] rows.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidRackPower`] if `power_per_rack` is not
    /// strictly positive, or if it or the room total is not finite.
    pub fn new(count: u32, power_per_rack: Power) -> Result<Self, ParameterError> {
        let power_per_rack = StrictlyPositive::new(power_per_rack)
            .map_err(ParameterError::InvalidRackPower)?
            .into_inner();

        let racks = Self {
            count,
            rows: DEFAULT_RACK_ROWS,
            power_per_rack,
        };
        finite(racks.total_power().get::<watt>()).map_err(ParameterError::InvalidRackPower)?;

        Ok(racks)
    }

    /// Constructs full rows of `racks_per_row` racks each.
    ///
    /// # Errors
    ///
    /// Returns an error if `rows` is zero or `power_per_rack` is not strictly
    /// positive.
    pub fn in_rows(
        rows: u32,
        racks_per_row: u32,
        power_per_rack: Power,
    ) -> Result<Self, ParameterError> {
        Self::new(rows.saturating_mul(racks_per_row), power_per_rack)?.with_rows(rows)
    }

    /// Returns this configuration spread over `rows` rows.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidRackRows`] if `rows` is zero.
    pub fn with_rows(self, rows: u32) -> Result<Self, ParameterError> {
        let rows = StrictlyPositive::new(rows)
            .map_err(ParameterError::InvalidRackRows)?
            .into_inner();
        Ok(Self { rows, ..self })
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Racks in a full row; the last row holds the remainder.
    #[must_use]
    pub fn racks_per_row(&self) -> u32 {
        self.count.div_ceil(self.rows)
    }

    #[must_use]
    pub fn power_per_rack(&self) -> Power {
        self.power_per_rack
    }

    /// Total IT load of the room.
    #[must_use]
    pub fn total_power(&self) -> Power {
        self.power_per_rack * f64::from(self.count)
    }
}

/// The share of incoming heat a capture stage removes.
///
/// The effectiveness must be in the interval [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effectiveness(Constrained<Ratio, UnitInterval>);

impl Effectiveness {
    /// Create an [`Effectiveness`] from a fraction.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside the interval [0, 1].
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Create an [`Effectiveness`] from a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity lies outside the interval [0, 1].
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(quantity)?))
    }

    /// An idle stage.
    #[must_use]
    pub fn none() -> Self {
        Self(UnitInterval::zero())
    }

    /// A stage that captures everything it receives.
    #[must_use]
    pub fn full() -> Self {
        Self(UnitInterval::one())
    }

    /// The effectiveness as a plain fraction.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.0.as_ref().get::<ratio>()
    }
}

impl Deref for Effectiveness {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Chip-level and rack-door liquid capture, applied in that order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidCooling {
    dclc: Effectiveness,
    rdhx: Effectiveness,
}

impl LiquidCooling {
    /// Constructs liquid cooling from DCLC and RDHX fractions.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidEffectiveness`] naming the stage whose
    /// fraction lies outside [0, 1].
    pub fn new(dclc: f64, rdhx: f64) -> Result<Self, ParameterError> {
        let check = |stage, value| {
            Effectiveness::new(value)
                .map_err(|source| ParameterError::InvalidEffectiveness { stage, source })
        };

        Ok(Self::from_effectiveness(
            check(CaptureStage::Dclc, dclc)?,
            check(CaptureStage::Rdhx, rdhx)?,
        ))
    }

    #[must_use]
    pub fn from_effectiveness(dclc: Effectiveness, rdhx: Effectiveness) -> Self {
        Self { dclc, rdhx }
    }

    /// A purely air-cooled room.
    #[must_use]
    pub fn none() -> Self {
        Self::from_effectiveness(Effectiveness::none(), Effectiveness::none())
    }

    #[must_use]
    pub fn dclc(&self) -> Effectiveness {
        self.dclc
    }

    #[must_use]
    pub fn rdhx(&self) -> Effectiveness {
        self.rdhx
    }
}

/// Waste-heat recovery exchangers acting on air-side heat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatRecovery {
    exchangers: u32,
    capacity_per_exchanger: Power,
}

impl HeatRecovery {
    /// Constructs heat recovery from an exchanger count and per-unit capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidHeatExchangerCapacity`] if the capacity
    /// is negative or `NaN`, or if it or the combined capacity is infinite.
    pub fn new(exchangers: u32, capacity_per_exchanger: Power) -> Result<Self, ParameterError> {
        let capacity_per_exchanger = NonNegative::new(capacity_per_exchanger)
            .map_err(ParameterError::InvalidHeatExchangerCapacity)?
            .into_inner();

        let recovery = Self {
            exchangers,
            capacity_per_exchanger,
        };
        finite(capacity_per_exchanger.get::<watt>())
            .and_then(|_| finite(recovery.total_capacity().get::<watt>()))
            .map_err(ParameterError::InvalidHeatExchangerCapacity)?;

        Ok(recovery)
    }

    /// No recovery exchangers installed.
    #[must_use]
    pub fn none() -> Self {
        Self {
            exchangers: 0,
            capacity_per_exchanger: NonNegative::zero::<Power>().into_inner(),
        }
    }

    #[must_use]
    pub fn exchangers(&self) -> u32 {
        self.exchangers
    }

    #[must_use]
    pub fn capacity_per_exchanger(&self) -> Power {
        self.capacity_per_exchanger
    }

    /// Nominal capacity of all exchangers combined.
    #[must_use]
    pub fn total_capacity(&self) -> Power {
        self.capacity_per_exchanger * f64::from(self.exchangers)
    }
}

/// Air handling units and their rated airflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirHandling {
    handlers: u32,
    flow_per_handler: Cfm,
}

impl AirHandling {
    /// Constructs air handling from a unit count and per-unit rating in CFM.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidAirflow`] if `cfm_per_handler` is not
    /// strictly positive, or if it or the combined airflow is not finite.
    pub fn new(handlers: u32, cfm_per_handler: f64) -> Result<Self, ParameterError> {
        let cfm = StrictlyPositive::new(cfm_per_handler)
            .map_err(ParameterError::InvalidAirflow)?
            .into_inner();
        let flow_per_handler = Cfm::new(cfm).map_err(ParameterError::InvalidAirflow)?;

        let air = Self {
            handlers,
            flow_per_handler,
        };
        finite(air.total_flow().value()).map_err(ParameterError::InvalidAirflow)?;

        Ok(air)
    }

    #[must_use]
    pub fn handlers(&self) -> u32 {
        self.handlers
    }

    #[must_use]
    pub fn flow_per_handler(&self) -> Cfm {
        self.flow_per_handler
    }

    /// Combined airflow of every handler.
    #[must_use]
    pub fn total_flow(&self) -> Cfm {
        self.flow_per_handler * self.handlers
    }
}

/// Supply air temperature and the hot-spot alert threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperatures {
    inlet: ThermodynamicTemperature,
    alert_threshold: ThermodynamicTemperature,
}

impl Temperatures {
    /// Constructs the temperature settings.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidTemperature`] if either temperature is
    /// at or below absolute zero, or not finite.
    pub fn new(
        inlet: ThermodynamicTemperature,
        alert_threshold: ThermodynamicTemperature,
    ) -> Result<Self, ParameterError> {
        let check = |value: ThermodynamicTemperature| {
            StrictlyPositive::new(value.get::<kelvin>())
                .map(Constrained::into_inner)
                .and_then(finite)
                .map(|_| value)
                .map_err(ParameterError::InvalidTemperature)
        };

        Ok(Self {
            inlet: check(inlet)?,
            alert_threshold: check(alert_threshold)?,
        })
    }

    /// Supply air temperature delivered by the air handlers.
    #[must_use]
    pub fn inlet(&self) -> ThermodynamicTemperature {
        self.inlet
    }

    /// Temperature above which a grid cell counts as a hot spot.
    #[must_use]
    pub fn alert_threshold(&self) -> ThermodynamicTemperature {
        self.alert_threshold
    }
}

/// A complete, validated snapshot of facility inputs.
///
/// Every calculation takes one parameter set and nothing else. Fields are
/// public because each group is already validated; changing a group means
/// building a new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    pub room: RoomGeometry,
    pub racks: RackConfig,
    pub liquid: LiquidCooling,
    pub recovery: HeatRecovery,
    pub air: AirHandling,
    pub temperatures: Temperatures,
}

impl ParameterSet {
    /// Total IT load, equal to the heat the racks release.
    #[must_use]
    pub fn total_it_power(&self) -> Power {
        self.racks.total_power()
    }

    #[must_use]
    pub fn room_volume(&self) -> Volume {
        self.room.volume()
    }

    /// Returns a copy with a different RDHX effectiveness.
    #[must_use]
    pub fn with_rdhx(self, rdhx: Effectiveness) -> Self {
        Self {
            liquid: LiquidCooling::from_effectiveness(self.liquid.dclc, rdhx),
            ..self
        }
    }
}
