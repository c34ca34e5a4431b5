//! Static wellness lookups.
//!
//! - `GET /get_weather_tip?condition=`
//! - `GET /find_doctors?specialty=&location=`

use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::directory::{self, Doctor};
use crate::wellness::{self, WeatherTip};

#[derive(Deserialize)]
pub struct WeatherQuery {
    pub condition: Option<String>,
}

pub async fn weather_tip(Query(query): Query<WeatherQuery>) -> Json<WeatherTip> {
    Json(wellness::weather_tip(query.condition.as_deref()))
}

#[derive(Deserialize)]
pub struct DoctorQuery {
    pub specialty: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize)]
pub struct DoctorsResponse {
    pub doctors: Vec<&'static Doctor>,
}

pub async fn find_doctors(Query(query): Query<DoctorQuery>) -> Json<DoctorsResponse> {
    Json(DoctorsResponse {
        doctors: directory::find_doctors(query.specialty.as_deref(), query.location.as_deref()),
    })
}
