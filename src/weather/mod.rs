mod client;
mod types;

pub use client::{render_weather, weather_text, WeatherClient, MISSING_API_KEY};
pub use types::{CloudCover, DaySummary, Humidity, Temperature};
