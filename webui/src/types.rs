//! Wire types shared with the libraryboard backend.
//!
//! These mirror the backend's JSON shapes; library records keep the media
//! server's PascalCase field names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct VirtualFolder {
    pub name: String,
    pub item_id: String,
    #[serde(default)]
    pub collection_type: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ReorderEntry {
    pub name: String,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

/// State of the "scan all libraries" button.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ScanControl {
    pub task_id: Option<String>,
    pub enabled: bool,
    pub busy: bool,
    pub progress: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LibrariesView {
    pub libraries: Vec<VirtualFolder>,
    pub order: Vec<ReorderEntry>,
    pub scan: ScanControl,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageView {
    Loading,
    Ready(LibrariesView),
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LibraryOrder {
    #[serde(rename = "libraryOrder")]
    pub library_order: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveLibraryRequest {
    pub name: String,
    pub direction: MoveDirection,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CollectionTypeOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateLibraryRequest {
    pub name: String,
    pub collection_type: String,
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CreateLibraryResponse {
    pub changed: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    Requested { task_id: String },
    Skipped,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub enum TaskState {
    Idle,
    Cancelling,
    Running,
}

/// Pushed over `/api/tasks/refresh/events` whenever the task list is polled.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RefreshTaskEvent {
    Snapshot { task_id: String, state: TaskState, progress: Option<f64> },
    Missing,
}
