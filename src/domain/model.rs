use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 整份資料集：events 與 eventImpacts 的順序即身份，必須原樣保留。
///
/// Unknown top-level keys are carried through the flattened map so the
/// filter never drops data it does not understand.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub event_impacts: Vec<EventImpact>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub aws_services_affected: Vec<String>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A URL-bearing reference attached to an event. Only `url` is ever
/// rewritten; sibling fields round-trip untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventImpact {
    pub service_id: String,
    pub feature_id: String,
    pub impact_type: String,
    pub description: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Read-only lookup context; never mutated by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Human-readable context for one impact, resolved from the service table.
#[derive(Debug, Clone)]
pub struct ImpactContext {
    pub service_name: String,
    pub company: String,
    pub feature_name: String,
}

/// 服務查找表：啟動時建一次，供所有 impact worker 唯讀共享。
#[derive(Debug, Clone)]
pub struct ServiceLookup {
    services: HashMap<String, Service>,
}

impl ServiceLookup {
    pub fn new(services: &[Service]) -> Self {
        Self {
            services: services
                .iter()
                .map(|s| (s.id.clone(), s.clone()))
                .collect(),
        }
    }

    /// Resolve display names for a `(serviceId, featureId)` pair, falling
    /// back to the raw identifiers when the service table has no entry.
    pub fn resolve(&self, service_id: &str, feature_id: &str) -> ImpactContext {
        match self.services.get(service_id) {
            Some(service) => {
                let feature_name = service
                    .features
                    .iter()
                    .find(|f| f.id == feature_id)
                    .map(|f| f.name.clone())
                    .unwrap_or_else(|| feature_id.to_string());

                ImpactContext {
                    service_name: service.name.clone(),
                    company: service.company.clone(),
                    feature_name,
                }
            }
            None => ImpactContext {
                service_name: service_id.to_string(),
                company: "Unknown".to_string(),
                feature_name: feature_id.to_string(),
            },
        }
    }
}
