//! Entity and relationship record checks

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::GraphViewResult;
use crate::types::{Attributes, Entity, GraphPayload, Relationship, Scalar};

/// Narrow a JSON value to an `Entity`.
///
/// Requires a non-empty `id` (string or number) and a non-empty `name`.
/// Non-scalar attribute values are discarded.
pub fn validate_entity(value: &Value) -> Option<Entity> {
    let obj = value.as_object()?;
    let id = id_field(obj, "id")?;
    let name = non_empty_str(obj, "name")?;
    let entity_type = non_empty_str(obj, "type").or_else(|| non_empty_str(obj, "entityType"));

    Some(Entity {
        id,
        name,
        entity_type,
        attributes: attributes(obj.get("attributes")),
    })
}

/// Narrow a JSON value to a `Relationship`.
///
/// Requires both endpoints and a type; `label` and `strength` are optional.
pub fn validate_relationship(value: &Value) -> Option<Relationship> {
    let obj = value.as_object()?;
    let source = id_field(obj, "source").or_else(|| id_field(obj, "from"))?;
    let target = id_field(obj, "target").or_else(|| id_field(obj, "to"))?;
    let relationship_type =
        non_empty_str(obj, "type").or_else(|| non_empty_str(obj, "relationType"))?;

    Some(Relationship {
        source,
        target,
        relationship_type,
        label: non_empty_str(obj, "label"),
        strength: obj.get("strength").and_then(Value::as_f64),
    })
}

/// Narrow a memory-graph JSONL line (`{name, entityType, observations}`)
/// to an `Entity`. Those records are keyed by name, so the name doubles as
/// the id; observations are kept as a count.
pub fn validate_named_entity(value: &Value) -> Option<Entity> {
    let obj = value.as_object()?;
    if obj.contains_key("id") {
        return None;
    }
    let name = non_empty_str(obj, "name")?;
    let entity_type = non_empty_str(obj, "entityType")?;

    let mut attributes = Attributes::new();
    if let Some(observations) = obj.get("observations").and_then(Value::as_array) {
        attributes.insert(
            "observations".to_string(),
            Scalar::Number(observations.len() as f64),
        );
    }

    Some(Entity {
        id: name.clone(),
        name,
        entity_type: Some(entity_type),
        attributes,
    })
}

/// Build a payload from a `{entities, relationships}` document
pub fn parse_payload(value: &Value) -> GraphPayload {
    let mut payload = GraphPayload::default();
    let mut dropped = 0usize;

    if let Some(items) = value.get("entities").and_then(Value::as_array) {
        for item in items {
            match validate_entity(item) {
                Some(entity) => payload.entities.push(entity),
                None => dropped += 1,
            }
        }
    }

    let relationships = value
        .get("relationships")
        .or_else(|| value.get("relations"))
        .and_then(Value::as_array);
    if let Some(items) = relationships {
        for item in items {
            match validate_relationship(item) {
                Some(rel) => payload.relationships.push(rel),
                None => dropped += 1,
            }
        }
    }

    if dropped > 0 {
        debug!(dropped, "Dropped malformed payload records");
    }
    payload
}

/// Parse payload text: either one JSON document or JSONL with one record
/// per line. Lines that are neither a valid entity nor a valid
/// relationship are skipped.
pub fn parse_payload_str(text: &str) -> GraphViewResult<GraphPayload> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(GraphPayload::default());
    }

    if let Ok(document) = serde_json::from_str::<Value>(trimmed) {
        if document.get("entities").is_some()
            || document.get("relationships").is_some()
            || document.get("relations").is_some()
        {
            return Ok(parse_payload(&document));
        }
    }

    let mut payload = GraphPayload::default();
    let mut dropped = 0usize;

    for line in trimmed.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(_) => {
                dropped += 1;
                continue;
            }
        };

        if let Some(entity) = validate_entity(&value).or_else(|| validate_named_entity(&value)) {
            payload.entities.push(entity);
        } else if let Some(rel) = validate_relationship(&value) {
            payload.relationships.push(rel);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        debug!(dropped, "Dropped malformed JSONL lines");
    }
    Ok(payload)
}

fn non_empty_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn id_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(_) => non_empty_str(obj, key),
        _ => None,
    }
}

fn attributes(value: Option<&Value>) -> Attributes {
    let mut attrs = Attributes::new();
    if let Some(Value::Object(map)) = value {
        for (key, value) in map {
            if let Some(scalar) = Scalar::from_json(value) {
                attrs.insert(key.clone(), scalar);
            }
        }
    }
    attrs
}
