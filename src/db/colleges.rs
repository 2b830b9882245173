use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::{College, NewCollege};

pub async fn list(pool: &PgPool) -> Result<Vec<College>, sqlx::Error> {
    sqlx::query_as::<_, College>("SELECT * FROM colleges ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<College>, sqlx::Error> {
    sqlx::query_as::<_, College>("SELECT * FROM colleges WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Case-insensitive substring match on the college name.
pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<College>, sqlx::Error> {
    let pattern = format!("%{}%", escape_like(term));
    sqlx::query_as::<_, College>(
        "SELECT * FROM colleges WHERE name ILIKE $1 ESCAPE '\\' ORDER BY name",
    )
    .bind(pattern)
    .fetch_all(pool)
    .await
}

/// Insert or refresh a catalog entry keyed by name.
pub async fn upsert(pool: &PgPool, new: &NewCollege) -> Result<College, sqlx::Error> {
    sqlx::query_as::<_, College>(
        "INSERT INTO colleges (id, name, image, images, rating, location, admission_date, tuition,
                               students_count, category, description, admission_process, events,
                               research, sports, research_count)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
         ON CONFLICT (name) DO UPDATE SET
             image = EXCLUDED.image,
             images = EXCLUDED.images,
             rating = EXCLUDED.rating,
             location = EXCLUDED.location,
             admission_date = EXCLUDED.admission_date,
             tuition = EXCLUDED.tuition,
             students_count = EXCLUDED.students_count,
             category = EXCLUDED.category,
             description = EXCLUDED.description,
             admission_process = EXCLUDED.admission_process,
             events = EXCLUDED.events,
             research = EXCLUDED.research,
             sports = EXCLUDED.sports,
             research_count = EXCLUDED.research_count,
             updated_at = now()
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&new.name)
    .bind(&new.image)
    .bind(&new.images)
    .bind(new.rating)
    .bind(&new.location)
    .bind(&new.admission_date)
    .bind(&new.tuition)
    .bind(new.students_count)
    .bind(&new.category)
    .bind(&new.description)
    .bind(Json(&new.admission_process))
    .bind(Json(&new.events))
    .bind(Json(&new.research))
    .bind(Json(&new.sports))
    .bind(new.research_count)
    .fetch_one(pool)
    .await
}

fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("MIT"), "MIT");
    }
}
