//! PostgREST client for the Supabase project that stores maps, nodes and paths.

use super::backend::{MapBackend, PathRecorder, PathRecordingRequest};
use super::error::BackendError;
use crate::models::{BackendSettings, FloorMap, MapNode, NavigationPath, NodeId, NodeUpdate, Waypoint};
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

const REST_PREFIX: &str = "/rest/v1";
const MAPS_TABLE: &str = "maps";
const MAP_NODES_TABLE: &str = "map_nodes";
const NAVIGATION_PATHS_TABLE: &str = "navigation_paths";
const CLIENT_INFO: &str = concat!("wayfinder-admin/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    settings: BackendSettings,
}

impl SupabaseClient {
    #[must_use]
    pub fn new(settings: BackendSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    fn table_url(&self, table: &str) -> Result<String, BackendError> {
        if !self.settings.is_configured() {
            return Err(BackendError::NotConfigured);
        }
        Ok(format!("{}{REST_PREFIX}/{table}", self.settings.base_url()))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request_id = Uuid::new_v4();
        crate::log!("{} {} ({})", method, url, request_id);

        let key = self.settings.anon_key.trim();
        self.http
            .request(method, url)
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
            .header("X-Client-Info", CLIENT_INFO)
            .header("X-Request-Id", request_id.to_string())
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        what: &'static str,
    ) -> Result<Vec<T>, BackendError> {
        let url = self.table_url(table)?;
        let response = self
            .request(Method::GET, &url)
            .query(&[("select", "*")])
            .query(query)
            .send()
            .await?;
        decode(ensure_success(response).await?, what).await
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> Result<(), BackendError> {
        let url = self.table_url(table)?;
        let response = self
            .request(Method::DELETE, &url)
            .query(&[("id", eq(id))])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response, what: &'static str) -> Result<T, BackendError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| BackendError::Decode { what, source })
}

/// Accept ids stored either as text or as integers
fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("unsupported id: {other}"))),
    }
}

#[derive(Debug, Deserialize)]
struct MapRow {
    #[serde(deserialize_with = "flexible_id")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    image_width: Option<f64>,
    #[serde(default)]
    image_height: Option<f64>,
}

impl From<MapRow> for FloorMap {
    fn from(row: MapRow) -> Self {
        FloorMap {
            id: row.id,
            name: row.name.unwrap_or_default(),
            image_url: row.image_url.unwrap_or_default(),
            image_size: (row.image_width.unwrap_or(0.0), row.image_height.unwrap_or(0.0)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MapNodeRow {
    #[serde(deserialize_with = "flexible_id")]
    id: String,
    #[serde(deserialize_with = "flexible_id")]
    map_id: String,
    #[serde(default)]
    name: Option<String>,
    x_position: f64,
    y_position: f64,
    #[serde(default)]
    reference_direction: Option<f64>,
}

impl From<MapNodeRow> for MapNode {
    fn from(row: MapNodeRow) -> Self {
        MapNode {
            id: NodeId::new(&row.id),
            map_id: row.map_id,
            name: row.name.unwrap_or_default(),
            position: (row.x_position, row.y_position),
            reference_direction: row.reference_direction,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NavigationPathRow {
    #[serde(deserialize_with = "flexible_id")]
    id: String,
    #[serde(default)]
    path_name: Option<String>,
    #[serde(deserialize_with = "flexible_id")]
    start_location_id: String,
    #[serde(deserialize_with = "flexible_id")]
    end_location_id: String,
    #[serde(default)]
    waypoints: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl From<NavigationPathRow> for NavigationPath {
    fn from(row: NavigationPathRow) -> Self {
        // Waypoints are written by the mobile recorder; a layout this editor
        // does not understand only loses the count.
        let waypoints = row
            .waypoints
            .and_then(|value| serde_json::from_value::<Vec<Waypoint>>(value).ok())
            .unwrap_or_default();

        NavigationPath {
            id: row.id,
            name: row.path_name.unwrap_or_else(|| "Unnamed path".to_string()),
            waypoints,
            start_location_id: NodeId::new(&row.start_location_id),
            end_location_id: NodeId::new(&row.end_location_id),
            created_at: row.created_at,
        }
    }
}

fn node_update_body(update: &NodeUpdate) -> serde_json::Value {
    serde_json::json!({
        "name": update.name,
        "x_position": update.position.0,
        "y_position": update.position.1,
        "reference_direction": update.reference_direction,
    })
}

fn new_path_body(request: &PathRecordingRequest, id: &str, created_at: DateTime<Utc>) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "path_name": request.default_path_name(),
        "start_location_id": request.start_node_id.as_str(),
        "end_location_id": request.end_node_id.as_str(),
        "waypoints": [],
        "created_at": created_at.to_rfc3339(),
    })
}

impl MapBackend for SupabaseClient {
    async fn fetch_maps(&self) -> Result<Vec<FloorMap>, BackendError> {
        let rows: Vec<MapRow> = self
            .select(MAPS_TABLE, &[("order", "name.asc".to_string())], "maps")
            .await?;
        Ok(rows.into_iter().map(FloorMap::from).collect())
    }

    async fn fetch_map(&self, map_id: &str) -> Result<FloorMap, BackendError> {
        let rows: Vec<MapRow> = self
            .select(MAPS_TABLE, &[("id", eq(map_id))], "map")
            .await?;
        rows.into_iter()
            .next()
            .map(FloorMap::from)
            .ok_or_else(|| BackendError::NotFound(format!("Map {map_id}")))
    }

    async fn fetch_map_nodes(&self, map_id: &str) -> Result<Vec<MapNode>, BackendError> {
        let rows: Vec<MapNodeRow> = self
            .select(
                MAP_NODES_TABLE,
                &[("map_id", eq(map_id)), ("order", "id.asc".to_string())],
                "map nodes",
            )
            .await?;
        Ok(rows.into_iter().map(MapNode::from).collect())
    }

    async fn fetch_navigation_paths(&self) -> Result<Vec<NavigationPath>, BackendError> {
        let rows: Vec<NavigationPathRow> = self
            .select(
                NAVIGATION_PATHS_TABLE,
                &[("order", "created_at.asc".to_string())],
                "navigation paths",
            )
            .await?;
        Ok(rows.into_iter().map(NavigationPath::from).collect())
    }

    async fn delete_navigation_path(&self, path_id: &str) -> Result<(), BackendError> {
        self.delete_by_id(NAVIGATION_PATHS_TABLE, path_id).await
    }

    async fn delete_map_node(&self, node_id: &NodeId) -> Result<(), BackendError> {
        self.delete_by_id(MAP_NODES_TABLE, node_id.as_str()).await
    }

    async fn update_map_node(&self, update: &NodeUpdate) -> Result<(), BackendError> {
        let url = self.table_url(MAP_NODES_TABLE)?;
        let response = self
            .request(Method::PATCH, &url)
            .query(&[("id", eq(update.id.as_str()))])
            .json(&node_update_body(update))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// Registers the route in `navigation_paths` with no waypoints yet; the mobile
/// recorder fills them in when someone walks it.
impl PathRecorder for SupabaseClient {
    async fn record(&self, request: &PathRecordingRequest) -> Result<Option<NavigationPath>, BackendError> {
        let url = self.table_url(NAVIGATION_PATHS_TABLE)?;
        let id = Uuid::new_v4().to_string();
        let response = self
            .request(Method::POST, &url)
            .header("Prefer", "return=representation")
            .json(&new_path_body(request, &id, Utc::now()))
            .send()
            .await?;

        let rows: Vec<NavigationPathRow> = decode(ensure_success(response).await?, "new navigation path").await?;
        Ok(rows.into_iter().next().map(NavigationPath::from))
    }
}
