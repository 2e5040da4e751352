use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub afternoon: Option<f64>,
    #[serde(default)]
    pub night: Option<f64>,
    #[serde(default)]
    pub evening: Option<f64>,
    #[serde(default)]
    pub morning: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Humidity {
    pub afternoon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudCover {
    pub afternoon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub lat: f64,
    pub lon: f64,
    pub date: String,
    pub temperature: Temperature,
    pub humidity: Humidity,
    pub cloud_cover: CloudCover,
}
