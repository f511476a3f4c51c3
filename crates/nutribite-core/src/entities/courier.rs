//! Courier entity - delivery staff attached to a courier account

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vehicle used for deliveries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Bicycle,
    Scooter,
    Car,
    Foot,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bicycle => "bicycle",
            Self::Scooter => "scooter",
            Self::Car => "car",
            Self::Foot => "foot",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bicycle" | "bike" => Ok(Self::Bicycle),
            "scooter" => Ok(Self::Scooter),
            "car" => Ok(Self::Car),
            "foot" => Ok(Self::Foot),
            _ => Err(format!("Invalid vehicle type: {s}")),
        }
    }
}

/// Courier record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Courier {
    pub id: i64,
    pub user_id: i64,
    pub vehicle_type: VehicleType,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
