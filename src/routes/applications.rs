use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Application, NewApplication};
use crate::routes::colleges::find_college;
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplication {
    #[serde(default)]
    pub college_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub candidate_email: String,
    #[serde(default)]
    pub candidate_phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub date_of_birth: String,
    pub image: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCreated {
    pub success: bool,
    pub message: String,
    pub application_id: String,
}

impl CreateApplication {
    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("collegeId", &self.college_id),
            ("userId", &self.user_id),
            ("candidateName", &self.candidate_name),
            ("subject", &self.subject),
            ("candidateEmail", &self.candidate_email),
            ("candidatePhone", &self.candidate_phone),
            ("address", &self.address),
            ("dateOfBirth", &self.date_of_birth),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateApplication>,
) -> Result<(StatusCode, Json<ApplicationCreated>), AppError> {
    let missing = req.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Please fill in all required fields: {}",
            missing.join(", ")
        )));
    }

    let date_of_birth = NaiveDate::parse_from_str(req.date_of_birth.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest("dateOfBirth must be YYYY-MM-DD".to_string()))?;

    let college = find_college(&state, &req.college_id).await?;

    let application = state
        .stores
        .applications
        .create_application(NewApplication {
            college_id: college.id,
            college_name: college.name,
            user_id: req.user_id.trim().to_string(),
            candidate_name: req.candidate_name.trim().to_string(),
            subject: req.subject.trim().to_string(),
            candidate_email: req.candidate_email.trim().to_string(),
            candidate_phone: req.candidate_phone.trim().to_string(),
            address: req.address.trim().to_string(),
            date_of_birth,
            image: req.image.filter(|url| !url.trim().is_empty()),
        })
        .await?;

    tracing::info!(application_id = %application.id, college_id = %application.college_id, "Application submitted");

    Ok((
        StatusCode::CREATED,
        Json(ApplicationCreated {
            success: true,
            message: "Application submitted successfully!".to_string(),
            application_id: application.id.to_string(),
        }),
    ))
}

pub async fn list_for_user(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = state
        .stores
        .applications
        .list_applications_for_user(user_id.trim())
        .await?;
    Ok(Json(applications))
}
