use serde::{Deserialize, Serialize};

/// A configured media library as reported by the media server.
///
/// Field names follow the upstream wire format (PascalCase) and are passed
/// through unchanged to the web UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VirtualFolder {
    pub name: String,
    pub item_id: String,
    #[serde(default)]
    pub collection_type: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

impl VirtualFolder {
    pub fn new(name: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self { name: name.into(), item_id: item_id.into(), collection_type: None, locations: Vec::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Idle,
    Cancelling,
    Running,
}

/// A background job tracked by the media server's scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LiveTask {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub state: TaskState,
    #[serde(default)]
    pub current_progress_percentage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Library kinds offered by the add-library workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionType {
    Movies,
    Tvshows,
    Music,
    Musicvideos,
    Homevideos,
    Boxsets,
    Books,
    Mixed,
}

impl CollectionType {
    pub const ALL: [CollectionType; 8] = [
        CollectionType::Movies,
        CollectionType::Tvshows,
        CollectionType::Music,
        CollectionType::Musicvideos,
        CollectionType::Homevideos,
        CollectionType::Boxsets,
        CollectionType::Books,
        CollectionType::Mixed,
    ];

    /// Value of the upstream `collectionType` query parameter.
    pub fn as_param(self) -> &'static str {
        match self {
            CollectionType::Movies => "movies",
            CollectionType::Tvshows => "tvshows",
            CollectionType::Music => "music",
            CollectionType::Musicvideos => "musicvideos",
            CollectionType::Homevideos => "homevideos",
            CollectionType::Boxsets => "boxsets",
            CollectionType::Books => "books",
            CollectionType::Mixed => "mixed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CollectionType::Movies => "Movies",
            CollectionType::Tvshows => "Shows",
            CollectionType::Music => "Music",
            CollectionType::Musicvideos => "Music Videos",
            CollectionType::Homevideos => "Home Videos and Photos",
            CollectionType::Boxsets => "Collections",
            CollectionType::Books => "Books",
            CollectionType::Mixed => "Mixed Movies and Shows",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionTypeOption {
    pub value: CollectionType,
    pub label: String,
}

// DTOs for the HTTP API

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryOrderDto {
    #[serde(rename = "libraryOrder")]
    pub library_order: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveLibraryRequest {
    pub name: String,
    pub direction: MoveDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLibraryRequest {
    pub name: String,
    pub collection_type: CollectionType,
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLibraryResponse {
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    Requested { task_id: String },
    Skipped,
}

/// One row of the reorder control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderEntry {
    pub name: String,
    pub can_move_up: bool,
    pub can_move_down: bool,
}

/// State of the "scan all libraries" button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanControl {
    pub task_id: Option<String>,
    pub enabled: bool,
    pub busy: bool,
    pub progress: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibrariesView {
    pub libraries: Vec<VirtualFolder>,
    pub order: Vec<ReorderEntry>,
    pub scan: ScanControl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageView {
    Loading,
    Ready(LibrariesView),
}

/// Snapshot of the refresh task pushed to SSE subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RefreshTaskEvent {
    Snapshot { task_id: String, state: TaskState, progress: Option<f64> },
    Missing,
}
