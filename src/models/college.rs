use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub images: Vec<String>,
    pub rating: f64,
    pub location: String,
    pub admission_date: String,
    pub tuition: String,
    pub students_count: i32,
    pub category: String,
    pub description: String,
    pub admission_process: Json<AdmissionProcess>,
    pub events: Json<Vec<CollegeEvent>>,
    pub research: Json<Research>,
    pub sports: Json<Sports>,
    pub research_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionProcess {
    pub requirements: Vec<String>,
    pub deadlines: Deadlines,
    pub acceptance_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deadlines {
    pub early_action: String,
    pub regular_decision: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeEvent {
    pub name: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Research {
    pub areas: Vec<String>,
    pub publications: i32,
    pub labs: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sports {
    pub teams: Vec<String>,
    pub facilities: Vec<String>,
    pub achievements: String,
}

/// Catalog entry as shipped in `seed/colleges.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollege {
    pub name: String,
    pub image: String,
    pub images: Vec<String>,
    pub rating: f64,
    pub location: String,
    pub admission_date: String,
    pub tuition: String,
    pub students_count: i32,
    pub category: String,
    pub description: String,
    pub admission_process: AdmissionProcess,
    pub events: Vec<CollegeEvent>,
    pub research: Research,
    pub sports: Sports,
    pub research_count: i32,
}
