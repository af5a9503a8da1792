use chrono::{DateTime, Utc};
use egui::Color32;
use kube::api::{ApiResource, DeleteParams, DynamicObject, GroupVersionKind, ListParams, PostParams};
use kube::core::Request;
use kube::{Api, Client, Config};
use serde_json::Value;
use velerolens::{ResourceKind, VELERO_API_VERSION, VELERO_GROUP, VELERO_VERSION, decode_payload};

pub fn format_age(ts: &str) -> String {
    let Ok(created) = DateTime::parse_from_rfc3339(ts) else {
        return ts.to_string();
    };
    format_duration_since(created.with_timezone(&Utc), Utc::now())
}

fn format_duration_since(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created);

    match elapsed.num_days() {
        days if days >= 365 => match days % 365 {
            0 => format!("{}y", days / 365),
            rest => format!("{}y {}d", days / 365, rest),
        },
        days if days > 0 => format!("{}d", days),
        _ => [(elapsed.num_hours(), 'h'), (elapsed.num_minutes(), 'm')]
            .into_iter()
            .find(|(amount, _)| *amount > 0)
            .map(|(amount, unit)| format!("{}{}", amount, unit))
            .unwrap_or_else(|| format!("{}s", elapsed.num_seconds().max(0))),
    }
}

pub fn item_color(item: &str) -> Color32 {
    match item {
        "Completed" => Color32::GREEN,
        "Available" => Color32::LIGHT_GREEN,
        "Enabled" => Color32::GREEN,
        "InProgress" => Color32::LIGHT_BLUE,
        "New" => Color32::GRAY,
        "WaitingForPluginOperations" => Color32::YELLOW,
        "Finalizing" => Color32::YELLOW,
        "PartiallyFailed" => Color32::ORANGE,
        "Deleting" => Color32::ORANGE,
        "FailedValidation" => Color32::RED,
        "Failed" => Color32::RED,
        "Unavailable" => Color32::RED,
        _ => Color32::LIGHT_GRAY,
    }
}

pub async fn get_cluster_name() -> Result<String, anyhow::Error> {
    let config = Config::infer().await?;
    Ok(config.cluster_url.host().unwrap_or("unknown").to_string())
}

fn collection_path(namespace: &str, kind: ResourceKind) -> String {
    format!("/apis/{}/namespaces/{}/{}", VELERO_API_VERSION, namespace, kind.plural())
}

/// Velero custom resources in one namespace, seen as plain JSON.
pub struct VeleroApi {
    client: Client,
    namespace: String,
}

impl VeleroApi {
    pub fn new(client: Client, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn api(&self, kind: ResourceKind) -> Api<DynamicObject> {
        let gvk = GroupVersionKind::gvk(VELERO_GROUP, VELERO_VERSION, kind.kind());
        let ar = ApiResource::from_gvk_with_plural(&gvk, kind.plural());
        Api::namespaced_with(self.client.clone(), &self.namespace, &ar)
    }

    /// Lists `kind` as the API server sends it, a `<Kind>List` envelope.
    pub async fn list(&self, kind: ResourceKind) -> Result<Value, anyhow::Error> {
        let request = Request::new(collection_path(&self.namespace, kind)).list(&ListParams::default())?;
        let body = self.client.request_text(request).await?;
        Ok(decode_payload(&body)?)
    }

    pub async fn get(&self, kind: ResourceKind, name: &str) -> Result<Value, anyhow::Error> {
        let obj = self.api(kind).get(name).await?;
        Ok(serde_json::to_value(&obj)?)
    }

    pub async fn create(&self, kind: ResourceKind, manifest: Value) -> Result<(), anyhow::Error> {
        let obj: DynamicObject = serde_json::from_value(manifest)?;
        self.api(kind).create(&PostParams::default(), &obj).await?;
        log::info!("Created {} {}", kind, obj.metadata.name.as_deref().unwrap_or_default());
        Ok(())
    }

    pub async fn delete(&self, kind: ResourceKind, name: &str) -> Result<(), anyhow::Error> {
        self.api(kind).delete(name, &DeleteParams::default()).await?;
        log::info!("Delete {}: {}", kind, name);
        Ok(())
    }
}
