//! Synthetic room temperature field.
//!
//! The field is a closed-form visualization aid, not a flow solution. It
//! starts from a uniform room temperature, adds a Gaussian plume over every
//! rack scaled by the share of heat that escapes to room air, subtracts
//! Gaussian cooling around air handlers and recovery exchangers, and clips
//! the result to a plausible band. Identical inputs give identical grids.

use tracing::debug;
use uom::{
    ConstZero,
    si::{
        f64::{Length, Power, Ratio, ThermodynamicTemperature},
        length::meter,
        power::kilowatt,
        ratio::ratio,
        temperature_interval::kelvin as delta_kelvin,
        thermodynamic_temperature::degree_celsius,
    },
};

use crate::support::{
    air::StandardAir,
    constraint::{Constrained, ConstraintError, StrictlyPositive},
};

use super::{
    BalanceConfig,
    airflow::{Airflow, RackExhaust, TemperatureRise},
    layout::{Layout, LayoutConfig, Position},
    params::{ParameterError, ParameterSet, RoomGeometry},
    stages::HeatBalance,
};

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    rows: usize,
    cols: usize,
    cells: usize,
}

impl Resolution {
    /// Largest grid accepted, in cells.
    pub const MAX_CELLS: usize = Self::MAX_CELLS_PER_AXIS * Self::MAX_CELLS_PER_AXIS;

    /// Per-axis cap applied by [`Resolution::for_room`].
    pub const MAX_CELLS_PER_AXIS: usize = 4096;

    /// Constructs a resolution of `rows` cells across the width and `cols`
    /// cells along the length.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidResolution`] if either count is zero
    /// or the grid would exceed [`Resolution::MAX_CELLS`].
    pub fn new(rows: usize, cols: usize) -> Result<Self, ParameterError> {
        let check = |cells| {
            Constrained::<usize, StrictlyPositive>::new(cells)
                .map(Constrained::into_inner)
                .map_err(ParameterError::InvalidResolution)
        };
        let rows = check(rows)?;
        let cols = check(cols)?;

        let cells = rows
            .checked_mul(cols)
            .filter(|&cells| cells <= Self::MAX_CELLS)
            .ok_or(ParameterError::InvalidResolution(
                ConstraintError::AboveMaximum,
            ))?;

        Ok(Self { rows, cols, cells })
    }

    /// Picks a resolution from the configured cell spacing and minimum count.
    #[must_use]
    pub fn for_room(room: &RoomGeometry, config: &FieldConfig) -> Self {
        let spacing = config.cell_spacing.get::<meter>();
        let cells = |extent: Length| {
            // Saturating cast; NaN maps to zero.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let spaced = (extent.get::<meter>() / spacing).floor() as usize;
            spaced
                .max(config.min_cells)
                .min(Self::MAX_CELLS_PER_AXIS)
                .max(1)
        };

        let rows = cells(room.width());
        let cols = cells(room.length());
        Self {
            rows,
            cols,
            cells: rows * cols,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells
    }
}

/// Shape constants for the synthetic field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    pub layout: LayoutConfig,
    /// Plume peak in kelvin per kW of rack heat reaching room air.
    pub plume_gain_per_kw: f64,
    pub plume_sigma: Length,
    /// Share of the airflow ΔT removed next to the handlers, split between them.
    pub handler_cooling_gain: f64,
    pub handler_sigma: Length,
    /// Share of the exchanger ΔT removed next to the exchangers, per unit.
    pub exchanger_cooling_gain: f64,
    pub exchanger_sigma: Length,
    /// Target grid spacing for [`Resolution::for_room`].
    pub cell_spacing: Length,
    pub min_cells: usize,
    /// Kelvin below the inlet the field may fall.
    pub below_inlet_margin: f64,
    /// Kelvin above room temperature the field may reach.
    pub above_room_margin: f64,
    /// Kelvin above the post-RDHX rack exhaust the field may reach.
    pub above_exhaust_margin: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            plume_gain_per_kw: 0.08,
            plume_sigma: Length::new::<meter>(0.8),
            handler_cooling_gain: 0.5,
            handler_sigma: Length::new::<meter>(3.0),
            exchanger_cooling_gain: 0.3,
            exchanger_sigma: Length::new::<meter>(2.5),
            cell_spacing: Length::new::<meter>(0.2),
            min_cells: 30,
            below_inlet_margin: 1.0,
            above_room_margin: 10.0,
            above_exhaust_margin: 3.0,
        }
    }
}

/// A row-major grid of cell temperatures in °C.
///
/// Row `r` lies at `y[r]` and column `c` at `x[c]`; both axes span the room
/// edge to edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    resolution: Resolution,
    x: Vec<f64>,
    y: Vec<f64>,
    cells: Vec<f64>,
}

impl Grid {
    fn uniform(room: &RoomGeometry, resolution: Resolution, value: f64) -> Self {
        Self {
            resolution,
            x: linspace(room.length().get::<meter>(), resolution.cols),
            y: linspace(room.width().get::<meter>(), resolution.rows),
            cells: vec![value; resolution.cell_count()],
        }
    }

    /// Adds `peak · exp(-(d/σ)²)` around `center` to every cell.
    fn add_gaussian(&mut self, center: &Position, peak: f64, sigma: Length) {
        let sigma = sigma.get::<meter>();
        let cols = self.resolution.cols;
        for (index, cell) in self.cells.iter_mut().enumerate() {
            let d = center.distance_m(self.x[index % cols], self.y[index / cols]);
            *cell += peak * (-(d / sigma).powi(2)).exp();
        }
    }

    fn clamp(&mut self, low: f64, high: f64) {
        for cell in &mut self.cells {
            *cell = cell.clamp(low, high);
        }
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Cell centers along the room length, in meters.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Cell centers across the room width, in meters.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// All cell temperatures in °C, row by row.
    #[must_use]
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// The temperature at `(row, col)`, if in range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<ThermodynamicTemperature> {
        if row >= self.resolution.rows || col >= self.resolution.cols {
            return None;
        }
        Some(celsius(self.cells[row * self.resolution.cols + col]))
    }

    /// Location of the cell at `(row, col)`, if in range.
    #[must_use]
    pub fn coordinates(&self, row: usize, col: usize) -> Option<(Length, Length)> {
        Some((
            Length::new::<meter>(*self.x.get(col)?),
            Length::new::<meter>(*self.y.get(row)?),
        ))
    }

    #[must_use]
    pub fn min(&self) -> ThermodynamicTemperature {
        celsius(self.cells.iter().copied().fold(f64::INFINITY, f64::min))
    }

    #[must_use]
    pub fn max(&self) -> ThermodynamicTemperature {
        celsius(self.cells.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    #[must_use]
    pub fn mean(&self) -> ThermodynamicTemperature {
        #[allow(clippy::cast_precision_loss)]
        let n = self.cells.len() as f64;
        celsius(self.cells.iter().sum::<f64>() / n)
    }
}

/// Cells hotter than the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotSpots {
    pub count: usize,
    /// `count` over the total cell count.
    pub fraction: Ratio,
    pub threshold: ThermodynamicTemperature,
}

impl HotSpots {
    fn scan(grid: &Grid, threshold: ThermodynamicTemperature) -> Self {
        let limit = threshold.get::<degree_celsius>();
        let count = grid.cells.iter().filter(|&&cell| cell > limit).count();

        #[allow(clippy::cast_precision_loss)]
        let fraction = count as f64 / grid.cells.len() as f64;

        Self {
            count,
            fraction: Ratio::new::<ratio>(fraction),
            threshold,
        }
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.count > 0
    }
}

/// A generated grid with its hot-spot summary.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureField {
    pub grid: Grid,
    pub hot_spots: HotSpots,
}

impl TemperatureField {
    /// Generates the field for a parameter set around a given room temperature.
    ///
    /// `uncaptured_fraction` is the share of rack heat that reaches room air
    /// and scales every rack plume.
    #[must_use]
    pub fn generate(
        params: &ParameterSet,
        room_temp: ThermodynamicTemperature,
        uncaptured_fraction: Ratio,
        resolution: Resolution,
        balance_config: &BalanceConfig,
        config: &FieldConfig,
    ) -> Self {
        let heat = HeatBalance::from_params(params);
        let airflow = Airflow::from_params(params);
        let exhaust = RackExhaust::estimate(params, &heat, balance_config.rack_cfm_per_kw);
        let layout = Layout::new(params, &config.layout);

        let room_c = room_temp.get::<degree_celsius>();
        let mut grid = Grid::uniform(&params.room, resolution, room_c);

        let plume_peak = params.racks.power_per_rack().get::<kilowatt>()
            * uncaptured_fraction.get::<ratio>()
            * config.plume_gain_per_kw;
        for rack in &layout.racks {
            grid.add_gaussian(rack, plume_peak, config.plume_sigma);
        }

        if airflow.is_moving() && !layout.air_handlers.is_empty() {
            let rise = TemperatureRise::from_balance(heat.residual, &airflow)
                .finite()
                .map_or(0.0, |rise| rise.get::<delta_kelvin>());
            #[allow(clippy::cast_precision_loss)]
            let per_handler =
                rise * config.handler_cooling_gain / layout.air_handlers.len() as f64;
            for handler in &layout.air_handlers {
                grid.add_gaussian(&handler.position, -per_handler, config.handler_sigma);
            }
        }

        let exchanger_drop = StandardAir::temperature_rise(heat.recovery, airflow.mass_rate)
            .filter(|_| heat.recovery > Power::ZERO && !layout.heat_exchangers.is_empty());
        if let Some(drop) = exchanger_drop {
            #[allow(clippy::cast_precision_loss)]
            let per_exchanger = drop.get::<delta_kelvin>() / layout.heat_exchangers.len() as f64
                * config.exchanger_cooling_gain;
            for exchanger in &layout.heat_exchangers {
                grid.add_gaussian(exchanger, -per_exchanger, config.exchanger_sigma);
            }
        }

        let inlet_c = params.temperatures.inlet().get::<degree_celsius>();
        let low = inlet_c - config.below_inlet_margin;
        let high = (room_c + config.above_room_margin)
            .max(exhaust.after_rdhx.get::<degree_celsius>() + config.above_exhaust_margin)
            .min(balance_config.room_temp_ceiling.get::<degree_celsius>())
            .max(low);
        grid.clamp(low, high);

        let hot_spots = HotSpots::scan(&grid, params.temperatures.alert_threshold());

        debug!(
            rows = resolution.rows,
            cols = resolution.cols,
            max_c = grid.max().get::<degree_celsius>(),
            hot_spots = hot_spots.count,
            hot_spot_fraction = hot_spots.fraction.get::<ratio>(),
            "generated temperature field"
        );

        Self { grid, hot_spots }
    }

    /// The hottest cell.
    #[must_use]
    pub fn peak(&self) -> ThermodynamicTemperature {
        self.grid.max()
    }
}

fn celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}

/// `n` evenly spaced points from 0 to `end` inclusive.
#[allow(clippy::cast_precision_loss)]
fn linspace(end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![0.0];
    }
    let step = end / (n - 1) as f64;
    (0..n).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use crate::models::thermal::datacenter::core::{
        compute_thermal_balance,
        params::{AirHandling, HeatRecovery, LiquidCooling, RackConfig},
        test_support::baseline,
    };

    fn field_for(params: &ParameterSet, resolution: Resolution) -> TemperatureField {
        let result = compute_thermal_balance(params);
        TemperatureField::generate(
            params,
            result.room_temp,
            result.heat.uncaptured_fraction(),
            resolution,
            &BalanceConfig::default(),
            &FieldConfig::default(),
        )
    }

    fn default_resolution(params: &ParameterSet) -> Resolution {
        Resolution::for_room(&params.room, &FieldConfig::default())
    }

    #[test]
    fn resolution_rejects_empty_axes() {
        assert!(Resolution::new(0, 10).is_err());
        assert!(Resolution::new(10, 0).is_err());
        assert_eq!(Resolution::new(1, 1).unwrap().cell_count(), 1);
    }

    #[test]
    fn resolution_rejects_oversized_grids() {
        let too_big = Err(ParameterError::InvalidResolution(
            ConstraintError::AboveMaximum,
        ));
        assert_eq!(Resolution::new(usize::MAX, 2), too_big);
        assert_eq!(Resolution::new(Resolution::MAX_CELLS, 2), too_big);

        let widest = Resolution::new(1, Resolution::MAX_CELLS).unwrap();
        assert_eq!(widest.cell_count(), Resolution::MAX_CELLS);
    }

    #[test]
    fn resolution_for_huge_room_is_capped() {
        let room = RoomGeometry::new(
            Length::new::<meter>(1e12),
            Length::new::<meter>(10.0),
            Length::new::<meter>(3.0),
        )
        .unwrap();

        let resolution = Resolution::for_room(&room, &FieldConfig::default());
        assert_eq!(resolution.cols(), Resolution::MAX_CELLS_PER_AXIS);
        assert_eq!(resolution.rows(), 50);
        assert_eq!(resolution.cell_count(), 50 * Resolution::MAX_CELLS_PER_AXIS);
    }

    #[test]
    fn resolution_respects_spacing_and_minimum() {
        let room = RoomGeometry::new(
            Length::new::<meter>(20.0),
            Length::new::<meter>(3.0),
            Length::new::<meter>(3.0),
        )
        .unwrap();
        let config = FieldConfig {
            cell_spacing: Length::new::<meter>(0.5),
            ..FieldConfig::default()
        };

        let resolution = Resolution::for_room(&room, &config);
        assert_eq!(resolution.cols(), 40);
        assert_eq!(resolution.rows(), 30);
    }

    #[test]
    fn axes_span_the_room() {
        let params = baseline();
        let field = field_for(&params, Resolution::new(11, 16).unwrap());

        assert_eq!(field.grid.x().len(), 16);
        assert_eq!(field.grid.y().len(), 11);
        assert_relative_eq!(field.grid.x()[15], 15.0, epsilon = 1e-12);
        assert_relative_eq!(field.grid.y()[10], 10.0, epsilon = 1e-12);
        assert_relative_eq!(field.grid.y()[1], 1.0, epsilon = 1e-12);

        let (x, y) = field.grid.coordinates(10, 15).unwrap();
        assert_relative_eq!(x.get::<meter>(), 15.0, epsilon = 1e-12);
        assert_relative_eq!(y.get::<meter>(), 10.0, epsilon = 1e-12);
        assert!(field.grid.get(11, 0).is_none());
        assert!(field.grid.coordinates(0, 16).is_none());
    }

    #[test]
    fn single_cell_grid_sits_at_origin() {
        let field = field_for(&baseline(), Resolution::new(1, 1).unwrap());
        assert_eq!(field.grid.x(), &[0.0]);
        assert_eq!(field.grid.cells().len(), 1);
    }

    #[test]
    fn baseline_field_stays_in_band() {
        let params = baseline();
        let field = field_for(&params, default_resolution(&params));
        let result = compute_thermal_balance(&params);

        let room = result.room_temp.get::<degree_celsius>();
        let low = 23.3 - 1.0;
        let high = (room + 10.0).max(result.rack_exhaust.after_rdhx.get::<degree_celsius>() + 3.0);

        assert!(field.grid.cells().iter().all(|&t| t >= low - 1e-9 && t <= high + 1e-9));
        assert!(field.grid.min().get::<degree_celsius>() >= low - 1e-9);
        assert!(field.peak() > result.room_temp);
    }

    #[test]
    fn plumes_sit_over_racks() {
        let params = baseline();
        let field = field_for(&params, default_resolution(&params));

        // Row 1 of racks lies near y = 2.08 m; a corner cell is far from any rack.
        let grid = &field.grid;
        let near_rack = grid
            .y()
            .iter()
            .position(|&y| y >= 2.0)
            .and_then(|row| grid.get(row, grid.resolution().cols() / 2))
            .unwrap();
        let corner = grid.get(grid.resolution().rows() - 1, 0).unwrap();
        assert!(near_rack > corner);
    }

    #[test]
    fn generation_is_deterministic() {
        let params = baseline();
        let a = field_for(&params, default_resolution(&params));
        let b = field_for(&params, default_resolution(&params));

        assert_eq!(a, b);
        assert!(
            a.grid
                .cells()
                .iter()
                .zip(b.grid.cells())
                .all(|(x, y)| x.to_bits() == y.to_bits())
        );
    }

    #[test]
    fn no_escaping_heat_means_no_plumes() {
        let mut params = baseline();
        params.liquid = LiquidCooling::new(1.0, 1.0).unwrap();
        let field = field_for(&params, default_resolution(&params));

        // No residual heat, so neither plumes nor handler cooling apply.
        assert!(field.grid.cells().iter().all(|&t| (t - 23.3).abs() < 1e-9));
        assert!(!field.hot_spots.any());
    }

    #[test]
    fn hot_spots_count_cells_above_threshold() {
        let mut params = baseline();
        params.liquid = LiquidCooling::none();
        let field = field_for(&params, default_resolution(&params));

        let threshold = params.temperatures.alert_threshold().get::<degree_celsius>();
        let expected = field.grid.cells().iter().filter(|&&t| t > threshold).count();
        assert_eq!(field.hot_spots.count, expected);
        assert!(field.hot_spots.any());
        #[allow(clippy::cast_precision_loss)]
        let fraction = expected as f64 / field.grid.cells().len() as f64;
        assert_relative_eq!(field.hot_spots.fraction.get::<ratio>(), fraction);
    }

    #[test]
    fn exchangers_cool_their_surroundings() {
        let mut params = baseline();
        let without = field_for(&params, default_resolution(&params));
        params.recovery = HeatRecovery::new(2, Power::new::<kilowatt>(60.0)).unwrap();
        let with = field_for(&params, default_resolution(&params));

        // Cell nearest the first exchanger at (3.75, 0.7).
        let grid = &with.grid;
        let col = grid.x().iter().position(|&x| x >= 3.75).unwrap();
        let row = grid.y().iter().position(|&y| y >= 0.7).unwrap();
        assert!(with.grid.get(row, col).unwrap() < without.grid.get(row, col).unwrap());
    }

    #[test]
    fn no_airflow_skips_cooling_and_caps_at_ceiling() {
        let mut params = baseline();
        params.air = AirHandling::new(0, 155_000.0).unwrap();
        let field = field_for(&params, default_resolution(&params));

        // Room air sits at the ceiling and plumes cannot push past it.
        assert_relative_eq!(field.peak().get::<degree_celsius>(), 60.0, epsilon = 1e-9);
        assert_relative_eq!(field.grid.min().get::<degree_celsius>(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_room_is_uniform_at_inlet() {
        let mut params = baseline();
        params.racks = RackConfig::new(0, Power::new::<kilowatt>(40.0)).unwrap();
        let field = field_for(&params, Resolution::new(5, 5).unwrap());

        assert!(field.grid.cells().iter().all(|&t| (t - 23.3).abs() < 1e-9));
        assert_relative_eq!(field.hot_spots.fraction.get::<ratio>(), 0.0);
    }
}
