//! Fleet domain records consumed by the advisory proxy
//!
//! Field names follow the dashboard's camelCase JSON so records exported from
//! it can be fed to the CLI unchanged.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Vehicle body class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleType {
    Motorcycle,
    Scooter,
    #[serde(rename = "Auto Rickshaw")]
    AutoRickshaw,
    #[serde(rename = "E-Rickshaw")]
    ERickshaw,
    Hatchback,
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    #[serde(rename = "Mini Van")]
    MiniVan,
    #[serde(rename = "Tempo Traveler")]
    TempoTraveler,
    #[serde(rename = "Pickup Truck")]
    PickupTruck,
    #[serde(rename = "LCV (Tata Ace)")]
    Lcv,
    #[serde(rename = "6-Tyre Truck")]
    SixTyreTruck,
    #[serde(rename = "10-Tyre Truck")]
    TenTyreTruck,
    #[serde(rename = "12-Tyre Lorry")]
    TwelveTyreLorry,
    #[serde(rename = "16-Tyre Trailer")]
    SixteenTyreTrailer,
    Tipper,
    Tanker,
    Tractor,
    Bus,
}

impl VehicleType {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Motorcycle => "Motorcycle",
            VehicleType::Scooter => "Scooter",
            VehicleType::AutoRickshaw => "Auto Rickshaw",
            VehicleType::ERickshaw => "E-Rickshaw",
            VehicleType::Hatchback => "Hatchback",
            VehicleType::Sedan => "Sedan",
            VehicleType::Suv => "SUV",
            VehicleType::MiniVan => "Mini Van",
            VehicleType::TempoTraveler => "Tempo Traveler",
            VehicleType::PickupTruck => "Pickup Truck",
            VehicleType::Lcv => "LCV (Tata Ace)",
            VehicleType::SixTyreTruck => "6-Tyre Truck",
            VehicleType::TenTyreTruck => "10-Tyre Truck",
            VehicleType::TwelveTyreLorry => "12-Tyre Lorry",
            VehicleType::SixteenTyreTrailer => "16-Tyre Trailer",
            VehicleType::Tipper => "Tipper",
            VehicleType::Tanker => "Tanker",
            VehicleType::Tractor => "Tractor",
            VehicleType::Bus => "Bus",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Active,
    #[serde(rename = "In Maintenance")]
    InMaintenance,
    #[serde(rename = "Out of Service")]
    OutOfService,
    Retired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
    #[serde(rename = "CNG")]
    Cng,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub plate: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub status: VehicleStatus,
    pub fuel_type: FuelType,
    pub mileage: u64,
    pub next_service_due: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub vehicle_id: String,
    pub service_type: String,
    pub date: NaiveDate,
    pub mileage: u64,
    pub cost: f64,
    pub status: RecordStatus,
    pub technician: String,
    #[serde(default)]
    pub description: String,
}

/// Input for a maintenance forecast: one vehicle plus service records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceCase {
    pub vehicle: Vehicle,
    #[serde(default)]
    pub history: Vec<MaintenanceRecord>,
}

impl MaintenanceCase {
    /// Records that belong to this case's vehicle, oldest first
    pub fn vehicle_history(&self) -> Vec<MaintenanceRecord> {
        let mut history: Vec<MaintenanceRecord> = self
            .history
            .iter()
            .filter(|record| record.vehicle_id == self.vehicle.id)
            .cloned()
            .collect();
        history.sort_by_key(|record| record.date);
        history
    }
}

#[cfg(test)]
#[path = "fleet_tests.rs"]
mod fleet_tests;
