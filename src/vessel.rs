//! Vessel parameters and the fuel/emissions digital twin.
//!
//! The twin converts a distance-plus-speed leg into fuel burn and CO2. Fuel
//! scales with the cube of the speed ratio against service speed (the
//! admiralty cube law); emissions are fuel mass times a fixed factor keyed
//! by fuel type. The twin holds no mutable state and is safe to share
//! across concurrent optimizations.

use serde::{Deserialize, Serialize};

/// Hours per day, for converting a daily consumption rate into a leg burn.
const HOURS_PER_DAY: f64 = 24.0;

/// Marine fuel types with distinct CO2 emission factors.
///
/// An unrecognized fuel type in a vessel record deserializes to
/// [`FuelType::Other`] and uses the default factor rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    /// Heavy fuel oil.
    Hfo,
    /// Very-low-sulphur fuel oil.
    Vlsfo,
    /// Marine gas oil.
    Mgo,
    /// Marine diesel oil.
    Mdo,
    /// Liquefied natural gas.
    Lng,
    /// Methanol.
    Methanol,
    /// Any fuel type not in the table.
    #[serde(other)]
    Other,
}

impl FuelType {
    /// Tons of CO2 emitted per ton of fuel burned (IMO carbon factors).
    #[must_use]
    pub const fn emission_factor(self) -> f64 {
        match self {
            Self::Hfo | Self::Vlsfo | Self::Other => 3.114,
            Self::Mgo | Self::Mdo => 3.206,
            Self::Lng => 2.750,
            Self::Methanol => 1.375,
        }
    }
}

/// Immutable physical parameters of one vessel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselParams {
    /// Deadweight tonnage.
    pub dwt: f64,
    /// Length overall in meters.
    pub length: f64,
    /// Beam in meters.
    pub beam: f64,
    /// Draft in meters.
    pub draft: f64,
    /// Service speed in knots.
    pub service_speed: f64,
    /// Fuel type burned by the main engine.
    pub fuel_type: FuelType,
    /// Fuel consumption in tons per day at service speed.
    pub fuel_consumption_rate: f64,
    /// Installed engine power in kW.
    pub engine_power: f64,
}

/// Fuel and emissions model for one vessel.
#[derive(Debug, Clone, Copy)]
pub struct DigitalTwin {
    params: VesselParams,
}

impl DigitalTwin {
    /// Build a twin from vessel parameters.
    #[must_use]
    pub const fn new(params: VesselParams) -> Self {
        Self { params }
    }

    /// The vessel parameters this twin was built from.
    #[must_use]
    pub const fn params(&self) -> &VesselParams {
        &self.params
    }

    /// Fuel in tons for a leg sailed at service speed.
    #[must_use]
    pub fn leg_fuel(&self, distance_nm: f64) -> f64 {
        self.leg_fuel_at(distance_nm, self.params.service_speed)
    }

    /// Fuel in tons for a leg sailed at an explicit speed.
    ///
    /// Admiralty cube law: consumption scales with `(speed / service)^3`,
    /// applied to the leg's sailing time in days.
    #[must_use]
    pub fn leg_fuel_at(&self, distance_nm: f64, speed_kts: f64) -> f64 {
        let ratio = speed_kts / self.params.service_speed;
        let days = distance_nm / speed_kts / HOURS_PER_DAY;
        self.params.fuel_consumption_rate * ratio.powi(3) * days
    }

    /// CO2 in tons for a given fuel burn.
    #[must_use]
    pub fn leg_co2(&self, fuel_tons: f64) -> f64 {
        fuel_tons * self.params.fuel_type.emission_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panamax() -> VesselParams {
        VesselParams {
            dwt: 75_000.0,
            length: 225.0,
            beam: 32.0,
            draft: 12.0,
            service_speed: 14.0,
            fuel_type: FuelType::Hfo,
            fuel_consumption_rate: 35.0,
            engine_power: 9_500.0,
        }
    }

    #[test]
    fn test_service_speed_fuel() {
        let twin = DigitalTwin::new(panamax());
        // one day of sailing at service speed burns one day of fuel
        let distance = 14.0 * 24.0;
        let fuel = twin.leg_fuel(distance);
        assert!((fuel - 35.0).abs() < 1e-9, "got {fuel}");
    }

    #[test]
    fn test_cube_law_slow_steaming() {
        let twin = DigitalTwin::new(panamax());
        let distance = 336.0;
        let at_service = twin.leg_fuel_at(distance, 14.0);
        let at_half = twin.leg_fuel_at(distance, 7.0);
        // half speed: 1/8 the rate for twice the time, one quarter overall
        assert!((at_half - at_service / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_co2_factor_by_fuel() {
        let mut params = panamax();
        let hfo = DigitalTwin::new(params);
        assert!((hfo.leg_co2(10.0) - 31.14).abs() < 1e-9);

        params.fuel_type = FuelType::Lng;
        let lng = DigitalTwin::new(params);
        assert!((lng.leg_co2(10.0) - 27.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_fuel_uses_default_factor() {
        let parsed: FuelType = serde_json::from_str("\"biodiesel\"").unwrap();
        assert_eq!(parsed, FuelType::Other);
        assert_eq!(parsed.emission_factor(), FuelType::Hfo.emission_factor());
    }
}
