use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::{self, Point};

/// Storage shape of a blueprint in the `blueprints` collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BlueprintDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub author: String,
    pub name: String,
    #[serde(default)]
    pub points: Vec<Point>,
}

impl From<models::Blueprint> for BlueprintDocument {
    fn from(value: models::Blueprint) -> Self {
        let (author, name, points) = value.into_parts();
        Self {
            id: None,
            author,
            name,
            points,
        }
    }
}

impl From<BlueprintDocument> for models::Blueprint {
    fn from(value: BlueprintDocument) -> Self {
        Self::new(value.author, value.name, value.points)
    }
}
