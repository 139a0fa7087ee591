//! Kanboard client example
//!
//! Kanboard's JSON-RPC API uses snake_case keys; this client is written in
//! camelCase and never sees the difference.
//!
//! ```text
//! KANBOARD_URL=https://kanboard.example.com/jsonrpc.php \
//! KANBOARD_TOKEN=... \
//! cargo run --example kanboard
//! ```

use caserpc::{create_client, init_observability, service, Error, ObservabilityConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Kanboard flags are the strings "0" and "1"
pub type Flag = String;

pub type Metadata = HashMap<String, Option<String>>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef {
    pub project_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMetadata {
    pub project_id: i64,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    pub project_id: i64,
    pub status_id: Flag,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub project_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUrl {
    pub board: String,
    pub list: String,
    pub calendar: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub is_active: Flag,
    pub is_public: Flag,
    pub is_private: Flag,
    pub description: Option<String>,
    pub identifier: String,
    pub owner_id: String,
    pub last_modified: i64,
    pub default_swimlane: Option<String>,
    pub task_limit: Option<String>,
    pub url: ProjectUrl,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub name: String,
    pub background: String,
    pub border: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub project_id: String,
    pub column_id: String,
    pub owner_id: String,
    pub is_active: Flag,
    pub date_creation: i64,
    pub date_due: i64,
    pub date_completed: Option<i64>,
    pub priority: String,
    pub url: String,
    pub color: Color,
}

#[service]
pub trait Kanboard {
    async fn get_all_projects(&self) -> Result<Vec<Project>, Error>;

    async fn get_project_by_id(&self, params: ProjectRef) -> Result<Option<Project>, Error>;

    async fn get_project_metadata(&self, params: ProjectRef) -> Result<Metadata, Error>;

    async fn save_project_metadata(&self, params: SaveMetadata) -> Result<bool, Error>;

    async fn get_all_tasks(&self, params: TaskFilter) -> Result<Vec<Task>, Error>;

    async fn update_project(&self, params: ProjectUpdate) -> Result<bool, Error>;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_observability(ObservabilityConfig::new("kanboard-demo"))?;

    let url = std::env::var("KANBOARD_URL")?;
    let token = std::env::var("KANBOARD_TOKEN")?;

    let client = create_client(&url, &token, Some(Duration::from_secs(10)))?;

    let projects = client.get_all_projects().await?;
    println!("{} project(s)", projects.len());

    for project in &projects {
        let project_id: i64 = project.id.parse()?;
        let tasks = client
            .get_all_tasks(TaskFilter {
                project_id,
                status_id: "1".to_string(),
            })
            .await?;

        println!(
            "#{} {} (owner {}, modified {}): {} open task(s), board {}",
            project.id,
            project.name,
            project.owner_id,
            project.last_modified,
            tasks.len(),
            project.url.board,
        );
        for task in tasks.iter().take(3) {
            println!("    - {} [{}]", task.title, task.color.name);
        }
    }

    if let Some(first) = projects.first() {
        let project_id: i64 = first.id.parse()?;

        let mut meta = client.get_project_metadata(ProjectRef { project_id }).await?;
        meta.insert("lastSyncedBy".to_string(), Some("kanboard-demo".to_string()));
        let saved = client
            .save_project_metadata(SaveMetadata { project_id, meta })
            .await?;
        println!("Metadata saved: {}", saved);

        // Only the fields set here are sent
        let updated = client
            .update_project(ProjectUpdate {
                project_id,
                description: Some("Synced by caserpc".to_string()),
                ..Default::default()
            })
            .await?;
        println!("Project updated: {}", updated);

        match client.get_project_by_id(ProjectRef { project_id: -1 }).await {
            Ok(None) => println!("No project -1, as expected"),
            Ok(Some(p)) => println!("Unexpected project {}", p.name),
            Err(e) => println!("Lookup failed ({}): {}", e.kind(), e),
        }
    }

    Ok(())
}
