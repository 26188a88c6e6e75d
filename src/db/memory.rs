use std::collections::{btree_map::Entry, BTreeMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Blueprint, Point};

use super::{GatewayError, GatewayResult, PersistenceGateway};

type Key = (String, String);

fn key(author: &str, name: &str) -> Key {
    (author.to_owned(), name.to_owned())
}

/// Process-local store. Writes take the lock for the whole check-and-modify step.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    blueprints: RwLock<BTreeMap<Key, Blueprint>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn save(&self, blueprint: &Blueprint) -> GatewayResult<()> {
        let mut blueprints = self.blueprints.write().await;
        match blueprints.entry(key(blueprint.author(), blueprint.name())) {
            Entry::Occupied(_) => Err(GatewayError::conflict(blueprint)),
            Entry::Vacant(slot) => {
                log::debug!(
                    "storing blueprint {}/{} with {} points",
                    blueprint.author(),
                    blueprint.name(),
                    blueprint.points().len()
                );
                slot.insert(blueprint.clone());
                Ok(())
            }
        }
    }

    async fn find_by_author_and_name(
        &self,
        author: &str,
        name: &str,
    ) -> GatewayResult<Option<Blueprint>> {
        let blueprints = self.blueprints.read().await;
        Ok(blueprints.get(&key(author, name)).cloned())
    }

    async fn find_by_author(&self, author: &str) -> GatewayResult<Vec<Blueprint>> {
        let blueprints = self.blueprints.read().await;
        Ok(blueprints
            .values()
            .filter(|bp| bp.author() == author)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> GatewayResult<Vec<Blueprint>> {
        let blueprints = self.blueprints.read().await;
        Ok(blueprints.values().cloned().collect())
    }

    async fn append_point(&self, author: &str, name: &str, point: Point) -> GatewayResult<()> {
        let mut blueprints = self.blueprints.write().await;
        let blueprint = blueprints
            .get_mut(&key(author, name))
            .ok_or_else(|| GatewayError::missing(author, name))?;
        log::debug!("appending ({}, {}) to blueprint {}/{}", point.x, point.y, author, name);
        blueprint.add_point(point);
        Ok(())
    }
}
