use crate::error::StoreError;
use crate::models::NewCollege;
use crate::store::CollegeStore;

const CATALOG: &str = include_str!("../seed/colleges.json");

pub fn catalog() -> Result<Vec<NewCollege>, serde_json::Error> {
    serde_json::from_str(CATALOG)
}

/// Upsert the bundled catalog by name. Existing applications and reviews keep
/// pointing at the same college ids.
pub async fn seed_colleges(store: &dyn CollegeStore) -> Result<usize, StoreError> {
    let colleges = catalog().map_err(|e| StoreError::Backend(format!("Invalid seed catalog: {e}")))?;
    let count = colleges.len();
    for college in colleges {
        store.upsert_college(college).await?;
    }
    tracing::info!("Seeded {count} colleges");
    Ok(count)
}
