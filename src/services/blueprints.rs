use std::{collections::HashSet, sync::Arc};

use crate::{
    db::PersistenceGateway,
    filters::BlueprintFilter,
    models::{Blueprint, Point},
    util::{Error, Result},
};

/// Blueprint operations on top of a [`PersistenceGateway`].
///
/// The configured filter only applies to [`BlueprintsService::get_blueprint`]; creation,
/// appends and the bulk reads see blueprints exactly as stored.
#[derive(Clone)]
pub struct BlueprintsService {
    gateway: Arc<dyn PersistenceGateway>,
    filter: BlueprintFilter,
}

impl BlueprintsService {
    pub fn new(gateway: Arc<dyn PersistenceGateway>, filter: BlueprintFilter) -> Self {
        Self { gateway, filter }
    }

    pub fn filter(&self) -> BlueprintFilter {
        self.filter
    }

    pub async fn add_new_blueprint(&self, blueprint: Blueprint) -> Result<()> {
        if blueprint.author().trim().is_empty() {
            return Err(Error::Invalid("author must not be blank".into()));
        }
        if blueprint.name().trim().is_empty() {
            return Err(Error::Invalid("name must not be blank".into()));
        }

        self.gateway.save(&blueprint).await?;
        Ok(())
    }

    pub async fn get_all_blueprints(&self) -> Result<HashSet<Blueprint>> {
        let blueprints = self.gateway.find_all().await?;
        Ok(blueprints.into_iter().collect())
    }

    pub async fn get_blueprints_by_author(&self, author: &str) -> Result<HashSet<Blueprint>> {
        let blueprints = self.gateway.find_by_author(author).await?;
        if blueprints.is_empty() {
            return Err(Error::author_not_found(author));
        }
        Ok(blueprints.into_iter().collect())
    }

    pub async fn get_blueprint(&self, author: &str, name: &str) -> Result<Blueprint> {
        let Some(blueprint) = self.gateway.find_by_author_and_name(author, name).await? else {
            return Err(Error::blueprint_not_found(author, name));
        };
        Ok(self.filter.apply(blueprint))
    }

    pub async fn add_point(&self, author: &str, name: &str, x: i32, y: i32) -> Result<()> {
        self.gateway
            .append_point(author, name, Point::new(x, y))
            .await?;
        Ok(())
    }
}
