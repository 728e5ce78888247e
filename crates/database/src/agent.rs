//! Agent CRUD operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Agent;

/// Create a new agent.
pub async fn create_agent(pool: &SqlitePool, agent: &Agent) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO agents (id, name, instructions, user_id)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&agent.id)
    .bind(&agent.name)
    .bind(&agent.instructions)
    .bind(&agent.user_id)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Agent",
                    id: agent.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get an agent by ID.
pub async fn get_agent(pool: &SqlitePool, id: &str) -> Result<Agent> {
    sqlx::query_as::<_, Agent>(
        r#"
        SELECT id, name, instructions, user_id
        FROM agents
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Agent",
        id: id.to_string(),
    })
}

/// Get agents by a set of IDs (used for transcript speaker resolution).
pub async fn get_agents_by_ids(pool: &SqlitePool, ids: &[String]) -> Result<Vec<Agent>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
        "SELECT id, name, instructions, user_id FROM agents WHERE id IN ({placeholders})"
    );

    let mut query = sqlx::query_as::<_, Agent>(&sql);
    for id in ids {
        query = query.bind(id);
    }

    Ok(query.fetch_all(pool).await?)
}

/// Update an existing agent.
pub async fn update_agent(pool: &SqlitePool, agent: &Agent) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE agents
        SET name = ?, instructions = ?
        WHERE id = ?
        "#,
    )
    .bind(&agent.name)
    .bind(&agent.instructions)
    .bind(&agent.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Agent",
            id: agent.id.clone(),
        });
    }

    Ok(())
}

/// Delete an agent by ID.
pub async fn delete_agent(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM agents WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Agent",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// List all agents.
pub async fn list_agents(pool: &SqlitePool) -> Result<Vec<Agent>> {
    let agents = sqlx::query_as::<_, Agent>(
        r#"
        SELECT id, name, instructions, user_id
        FROM agents
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(agents)
}
