use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, Database, IndexModel,
};

use crate::models::{Blueprint, Point};

use super::{BlueprintDocument, GatewayError, GatewayResult, PersistenceGateway};

const BLUEPRINTS_COLLECTION: &str = "blueprints";
pub const DEFAULT_DATABASE: &str = "blueprints";

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

fn key(author: &str, name: &str) -> Document {
    doc! { "author": author, "name": name }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

/// Blueprints stored in MongoDB, one document per blueprint.
///
/// Uniqueness of `(author, name)` is enforced by a unique compound index, so the check and the
/// insert happen in one server-side step.
#[derive(Clone)]
pub struct MongoGateway {
    collection: Collection<BlueprintDocument>,
}

impl MongoGateway {
    /// Connects to `uri`, using the database named in the URI or [`DEFAULT_DATABASE`].
    pub async fn connect(uri: &str) -> GatewayResult<Self> {
        let client = mongodb::Client::with_uri_str(uri).await?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        Self::from_database(&db).await
    }

    pub async fn from_database(db: &Database) -> GatewayResult<Self> {
        let collection = db.collection::<BlueprintDocument>(BLUEPRINTS_COLLECTION);

        let index = IndexModel::builder()
            .keys(doc! { "author": 1, "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(index, None).await?;
        log::info!(
            "using mongodb collection {}.{}",
            db.name(),
            BLUEPRINTS_COLLECTION
        );

        Ok(Self { collection })
    }

    async fn find_many(&self, filter: Document) -> GatewayResult<Vec<Blueprint>> {
        let cursor = self.collection.find(filter, None).await?;
        let blueprints: Vec<Blueprint> = cursor.map_ok(Blueprint::from).try_collect().await?;
        Ok(blueprints)
    }
}

#[async_trait]
impl PersistenceGateway for MongoGateway {
    async fn save(&self, blueprint: &Blueprint) -> GatewayResult<()> {
        let document = BlueprintDocument::from(blueprint.clone());

        match self.collection.insert_one(&document, None).await {
            Ok(inserted) => {
                log::debug!(
                    "stored blueprint {}/{} as {}",
                    blueprint.author(),
                    blueprint.name(),
                    inserted.inserted_id
                );
                Ok(())
            }
            Err(err) if is_duplicate_key(&err) => Err(GatewayError::conflict(blueprint)),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_author_and_name(
        &self,
        author: &str,
        name: &str,
    ) -> GatewayResult<Option<Blueprint>> {
        let document = self.collection.find_one(key(author, name), None).await?;
        Ok(document.map(Blueprint::from))
    }

    async fn find_by_author(&self, author: &str) -> GatewayResult<Vec<Blueprint>> {
        self.find_many(doc! { "author": author }).await
    }

    async fn find_all(&self) -> GatewayResult<Vec<Blueprint>> {
        self.find_many(doc! {}).await
    }

    async fn append_point(&self, author: &str, name: &str, point: Point) -> GatewayResult<()> {
        let update = doc! {
            "$push": {
                "points": bson::to_bson(&point)?,
            }
        };

        let result = self
            .collection
            .update_one(key(author, name), update, None)
            .await?;
        if result.matched_count == 0 {
            return Err(GatewayError::missing(author, name));
        }

        log::debug!("appended ({}, {}) to blueprint {}/{}", point.x, point.y, author, name);
        Ok(())
    }
}
