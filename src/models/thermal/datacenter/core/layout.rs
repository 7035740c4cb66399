//! Deterministic floor plan for racks, air handlers, and heat exchangers.
//!
//! Coordinates are measured from the room corner: `x` runs along the room
//! length and `y` across its width. Rack rows run along `x` and are stacked
//! along `y`.

use std::fmt;

use uom::si::{f64::Length, length::meter};

use super::params::ParameterSet;

/// Footprint and spacing heuristics for placing equipment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Rack extent along a row.
    pub rack_width: Length,
    /// Rack extent across a row.
    pub rack_depth: Length,
    /// Gap between the walls and the first row or rack.
    pub wall_clearance: Length,
    /// Gap between adjacent rows.
    pub aisle_width: Length,
    /// Distance from the wall to wall-mounted equipment centers.
    pub equipment_offset: Length,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rack_width: Length::new::<meter>(0.762),
            rack_depth: Length::new::<meter>(1.1684),
            wall_clearance: Length::new::<meter>(1.5),
            aisle_width: Length::new::<meter>(1.2446),
            equipment_offset: Length::new::<meter>(0.7),
        }
    }
}

/// A point on the floor plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: Length,
    pub y: Length,
}

impl Position {
    /// Straight-line distance to a point given in meters.
    pub(super) fn distance_m(&self, x: f64, y: f64) -> f64 {
        (self.x.get::<meter>() - x).hypot(self.y.get::<meter>() - y)
    }
}

/// The wall an air handler is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    /// `x = 0`.
    Left,
    /// `x = length`.
    Right,
    /// `y = 0`.
    Top,
    /// `y = width`.
    Bottom,
}

impl Wall {
    /// The order in which handlers are assigned to walls.
    pub const ORDER: [Self; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirHandlerPlacement {
    pub wall: Wall,
    pub position: Position,
}

/// Equipment positions for one parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub racks: Vec<Position>,
    pub air_handlers: Vec<AirHandlerPlacement>,
    pub heat_exchangers: Vec<Position>,
}

impl Layout {
    #[must_use]
    pub fn new(params: &ParameterSet, config: &LayoutConfig) -> Self {
        Self {
            racks: place_racks(params, config),
            air_handlers: place_air_handlers(params, config),
            heat_exchangers: place_heat_exchangers(params, config),
        }
    }
}

/// Fills rows in order; each row is centered on its own rack count.
fn place_racks(params: &ParameterSet, config: &LayoutConfig) -> Vec<Position> {
    let racks = &params.racks;
    let per_row = racks.racks_per_row();
    let available = params.room.length() - config.wall_clearance * 2.0;

    let mut positions = Vec::with_capacity(racks.count() as usize);
    let mut left = racks.count();

    for row in 0..racks.rows() {
        let in_row = left.min(per_row);
        if in_row == 0 {
            break;
        }
        left -= in_row;

        let y = config.wall_clearance
            + config.rack_depth / 2.0
            + (config.rack_depth + config.aisle_width) * f64::from(row);
        let start_x =
            config.wall_clearance + (available - config.rack_width * f64::from(in_row)) / 2.0;

        positions.extend((0..in_row).map(|i| Position {
            x: start_x + config.rack_width * (f64::from(i) + 0.5),
            y,
        }));
    }

    positions
}

/// Cycles handlers over the walls and spreads each wall's share evenly.
fn place_air_handlers(params: &ParameterSet, config: &LayoutConfig) -> Vec<AirHandlerPlacement> {
    let count = params.air.handlers();
    let length = params.room.length();
    let width = params.room.width();
    let offset = config.equipment_offset;

    (0..count)
        .map(|i| {
            let wall_index = i % 4;
            let wall = Wall::ORDER[wall_index as usize];
            let on_wall = (count + 3 - wall_index) / 4;
            let along = f64::from(i / 4 + 1) / f64::from(on_wall + 1);

            let position = match wall {
                Wall::Left => Position {
                    x: offset,
                    y: width * along,
                },
                Wall::Right => Position {
                    x: length - offset,
                    y: width * along,
                },
                Wall::Top => Position {
                    x: length * along,
                    y: offset,
                },
                Wall::Bottom => Position {
                    x: length * along,
                    y: width - offset,
                },
            };

            AirHandlerPlacement { wall, position }
        })
        .collect()
}

/// Spaces exchangers evenly along the top wall.
fn place_heat_exchangers(params: &ParameterSet, config: &LayoutConfig) -> Vec<Position> {
    let count = params.recovery.exchangers();
    let length = params.room.length();

    (0..count)
        .map(|i| Position {
            x: length * (f64::from(2 * i + 1) / f64::from(2 * count)),
            y: config.equipment_offset,
        })
        .collect()
}
