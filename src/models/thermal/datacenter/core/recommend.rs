//! Rule-based operating advice.
//!
//! Rules run in a fixed priority order and several may fire at once. The
//! list is always rebuilt from scratch for a given result.

use std::fmt;

use uom::{
    ConstZero,
    si::{
        energy::megawatt_hour,
        f64::{Energy, Length, Power, Time},
        length::meter,
        power::kilowatt,
        ratio::ratio,
        time::hour,
    },
};

use super::{
    field::HotSpots,
    params::ParameterSet,
    pue::{Pue, PueThresholds},
    results::{HOURS_PER_YEAR, ThermalResult},
};

/// Equipment limits and targets the rules compare against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationLimits {
    /// Handlers beyond this count are not suggested.
    pub max_air_handlers: u32,
    pub max_heat_exchangers: u32,
    /// RDHX effectiveness below which an upgrade is suggested.
    pub rdhx_target: f64,
    /// DCLC effectiveness below which an upgrade is suggested.
    pub dclc_target: f64,
    /// Rooms lower than this are flagged when hot spots appear.
    pub min_room_height: Length,
    pub pue: PueThresholds,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            max_air_handlers: 4,
            max_heat_exchangers: 2,
            rdhx_target: 0.95,
            dclc_target: 0.5,
            min_room_height: Length::new::<meter>(4.0),
            pue: PueThresholds::default(),
        }
    }
}

/// A single piece of advice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recommendation {
    /// No supply air is moving but heat still reaches the room.
    RestoreAirflow,
    AddAirHandler { current: u32 },
    ImproveRdhx { current: f64 },
    ImproveDclc { current: f64 },
    AddHeatExchanger { current: u32 },
    IncreaseRoomHeight { current: Length },
    IncreaseLiquidCapture { pue: f64, liquid_fraction: f64 },
    /// Liquid loops carry heat that nothing reuses.
    RecoverWasteHeat { available: Power },
}

impl Recommendation {
    /// Evaluates every rule against a computed result.
    ///
    /// `hot_spots` is `None` before the temperature field has been generated.
    #[must_use]
    pub fn evaluate(
        params: &ParameterSet,
        result: &ThermalResult,
        hot_spots: Option<&HotSpots>,
        limits: &RecommendationLimits,
    ) -> Vec<Self> {
        let mut advice = Vec::new();

        if result.delta_t.is_saturated() {
            advice.push(Self::RestoreAirflow);
        }

        let has_hot_spots = hot_spots.is_some_and(HotSpots::any);
        let overheated = result.room_temp > params.temperatures.alert_threshold();

        if overheated || has_hot_spots {
            let handlers = params.air.handlers();
            if handlers < limits.max_air_handlers {
                advice.push(Self::AddAirHandler { current: handlers });
            }

            let rdhx = params.liquid.rdhx().fraction();
            if rdhx < limits.rdhx_target {
                advice.push(Self::ImproveRdhx { current: rdhx });
            }

            let dclc = params.liquid.dclc().fraction();
            if dclc < limits.dclc_target {
                advice.push(Self::ImproveDclc { current: dclc });
            }

            let exchangers = params.recovery.exchangers();
            if exchangers < limits.max_heat_exchangers {
                advice.push(Self::AddHeatExchanger {
                    current: exchangers,
                });
            }
        }

        let height = params.room.height();
        if has_hot_spots && height < limits.min_room_height {
            advice.push(Self::IncreaseRoomHeight { current: height });
        }

        match result.power.pue {
            Pue::Defined(pue) if pue >= limits.pue.excellent => {
                advice.push(Self::IncreaseLiquidCapture {
                    pue,
                    liquid_fraction: result.liquid_cooling_fraction.get::<ratio>(),
                });
            }
            _ => {}
        }

        let available = result.heat.liquid_captured();
        if params.recovery.exchangers() == 0 && available > Power::ZERO {
            advice.push(Self::RecoverWasteHeat { available });
        }

        advice
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::RestoreAirflow => {
                f.write_str("restore air handling: no supply air is removing room heat")
            }
            Self::AddAirHandler { current } => write!(
                f,
                "increase air handlers from {current} to {}",
                current + 1
            ),
            Self::ImproveRdhx { current } => write!(
                f,
                "improve RDHX effectiveness (currently {:.0}%)",
                current * 100.0
            ),
            Self::ImproveDclc { current } => write!(
                f,
                "improve DCLC effectiveness (currently {:.0}%)",
                current * 100.0
            ),
            Self::AddHeatExchanger { current } => write!(
                f,
                "add heat exchangers for additional cooling (currently {current})"
            ),
            Self::IncreaseRoomHeight { current } => write!(
                f,
                "consider increasing room height ({:.1} m) for better air circulation",
                current.get::<meter>()
            ),
            Self::IncreaseLiquidCapture {
                pue,
                liquid_fraction,
            } => write!(
                f,
                "PUE {pue:.2} with {:.0}% liquid capture; move more heat to liquid loops",
                liquid_fraction * 100.0
            ),
            Self::RecoverWasteHeat { available } => {
                let kw = available.get::<kilowatt>();
                let annual: Energy = available * Time::new::<hour>(HOURS_PER_YEAR);
                write!(
                    f,
                    "add heat exchangers to reuse {kw:.0} kW of captured heat (~{:.0} MWh/year)",
                    annual.get::<megawatt_hour>()
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::f64::Ratio;

    use crate::models::thermal::datacenter::core::{
        compute_thermal_balance,
        params::{AirHandling, HeatRecovery, LiquidCooling, RackConfig, Temperatures},
        test_support::{baseline, celsius},
    };

    fn hot_spots(count: usize) -> HotSpots {
        HotSpots {
            count,
            fraction: Ratio::new::<ratio>(0.1),
            threshold: celsius(30.0),
        }
    }

    fn advise(params: &ParameterSet, spots: Option<&HotSpots>) -> Vec<Recommendation> {
        let result = compute_thermal_balance(params);
        Recommendation::evaluate(params, &result, spots, &RecommendationLimits::default())
    }

    #[test]
    fn healthy_baseline_only_suggests_recovery() {
        let advice = advise(&baseline(), Some(&hot_spots(0)));
        assert_eq!(advice.len(), 1);
        assert!(matches!(
            advice[0],
            Recommendation::RecoverWasteHeat { available } if (available.get::<kilowatt>() - 2208.0).abs() < 1e-6
        ));
    }

    #[test]
    fn hot_spots_trigger_equipment_advice_in_order() {
        let advice = advise(&baseline(), Some(&hot_spots(12)));

        assert_eq!(
            advice,
            vec![
                Recommendation::AddAirHandler { current: 2 },
                Recommendation::ImproveRdhx { current: 0.9 },
                Recommendation::ImproveDclc { current: 0.2 },
                Recommendation::AddHeatExchanger { current: 0 },
                Recommendation::IncreaseRoomHeight {
                    current: Length::new::<meter>(3.0)
                },
                Recommendation::RecoverWasteHeat {
                    available: compute_thermal_balance(&baseline()).heat.liquid_captured()
                },
            ]
        );
    }

    #[test]
    fn equipment_at_limits_is_not_suggested() {
        let mut params = baseline();
        params.air = AirHandling::new(4, 50_000.0).unwrap();
        params.liquid = LiquidCooling::new(0.5, 0.95).unwrap();
        params.recovery = HeatRecovery::new(2, Power::new::<kilowatt>(60.0)).unwrap();

        let advice = advise(&params, Some(&hot_spots(3)));
        assert_eq!(
            advice,
            vec![Recommendation::IncreaseRoomHeight {
                current: Length::new::<meter>(3.0)
            }]
        );
    }

    #[test]
    fn overheated_room_triggers_advice_without_field() {
        let mut params = baseline();
        params.temperatures = Temperatures::new(celsius(23.3), celsius(24.0)).unwrap();

        let advice = advise(&params, None);
        assert!(advice.contains(&Recommendation::AddAirHandler { current: 2 }));
        // Height advice needs a hot-spot pass.
        assert!(
            !advice
                .iter()
                .any(|r| matches!(r, Recommendation::IncreaseRoomHeight { .. }))
        );
    }

    #[test]
    fn saturated_airflow_comes_first() {
        let mut params = baseline();
        params.air = AirHandling::new(0, 155_000.0).unwrap();

        let advice = advise(&params, None);
        assert_eq!(advice[0], Recommendation::RestoreAirflow);
        assert!(advice.contains(&Recommendation::AddAirHandler { current: 0 }));
    }

    #[test]
    fn poor_pue_asks_for_liquid_capture() {
        let mut params = baseline();
        params.liquid = LiquidCooling::none();

        let advice = advise(&params, None);
        let pue = advice.iter().find_map(|r| match r {
            Recommendation::IncreaseLiquidCapture {
                pue,
                liquid_fraction,
            } => Some((*pue, *liquid_fraction)),
            _ => None,
        });
        let (pue, liquid) = pue.unwrap();
        assert!(pue > 1.3);
        assert!(liquid.abs() < 1e-12);
    }

    #[test]
    fn empty_room_needs_nothing() {
        let mut params = baseline();
        params.racks = RackConfig::new(0, Power::new::<kilowatt>(40.0)).unwrap();
        assert!(advise(&params, Some(&hot_spots(0))).is_empty());
    }

    #[test]
    fn messages_read_naturally() {
        assert_eq!(
            Recommendation::AddAirHandler { current: 2 }.to_string(),
            "increase air handlers from 2 to 3"
        );
        assert_eq!(
            Recommendation::ImproveRdhx { current: 0.9 }.to_string(),
            "improve RDHX effectiveness (currently 90%)"
        );
        let recover = Recommendation::RecoverWasteHeat {
            available: Power::new::<kilowatt>(1000.0),
        };
        assert_eq!(
            recover.to_string(),
            "add heat exchangers to reuse 1000 kW of captured heat (~8760 MWh/year)"
        );
    }
}
