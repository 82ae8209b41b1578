//! Support attribute repositories.
//!
//! Seven relations share one shape: a GSS code mapped to a display name,
//! loaded from a bundled JSON document under the data directory. The
//! repository is generic over the entity; each submodule contributes the
//! document name, the index name, and the row constructor.

pub mod ccg;
pub mod constituency;
pub mod county;
pub mod district;
pub mod nuts;
pub mod parish;
pub mod ward;

use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

use crate::data::{lifecycle::ReferenceEntity, relation};
use crate::error::ImportError;
use crate::ingest::INSERT_BATCH_SIZE;
use crate::source::{attribute::load_code_map, ImportSource};

pub use ccg::CcgRepository;
pub use constituency::ConstituencyRepository;
pub use county::CountyRepository;
pub use district::DistrictRepository;
pub use nuts::NutsRepository;
pub use parish::ParishRepository;
pub use ward::WardRepository;

/// Per-entity wiring for the shared attribute repository.
pub trait AttributeEntity: EntityTrait {
    /// Relation name, also recorded for rollback.
    const RELATION: &'static str;

    /// File name of the code document under the data directory.
    const DOCUMENT: &'static str;

    /// Name of the unique code index.
    const CODE_INDEX: &'static str;

    /// The code column, for the unique index.
    fn code_column() -> Self::Column;

    /// Builds the row for one code-name pair.
    fn model(code: String, name: String) -> Self::ActiveModel;
}

/// Repository over any of the attribute relations.
pub struct AttributeRepository<'a, C: ConnectionTrait, E: AttributeEntity> {
    db: &'a C,
    entity: PhantomData<E>,
}

impl<'a, C: ConnectionTrait, E: AttributeEntity> AttributeRepository<'a, C, E>
where
    E::Model: sea_orm::FromQueryResult + Sized + Send + Sync,
{
    pub fn new(db: &'a C) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }

    pub async fn count(&self) -> Result<u64, ImportError> {
        Ok(E::find().count(self.db).await?)
    }
}

#[async_trait]
impl<'a, C, E> ReferenceEntity for AttributeRepository<'a, C, E>
where
    C: ConnectionTrait,
    E: AttributeEntity,
    E::ActiveModel: Clone + Send + Sync,
{
    fn relation(&self) -> &'static str {
        E::RELATION
    }

    async fn setup_table(&self, source: &ImportSource) -> Result<u64, ImportError> {
        relation::drop_relation(self.db, E::default()).await?;
        relation::create_relation(self.db, E::default()).await?;

        let codes = load_code_map(&source.data_dir.join(E::DOCUMENT))?;
        let models: Vec<E::ActiveModel> = codes
            .into_iter()
            .map(|(code, name)| E::model(code, name))
            .collect();
        let rows = models.len() as u64;

        for chunk in models.chunks(INSERT_BATCH_SIZE) {
            E::insert_many(chunk.to_vec()).exec(self.db).await?;
        }

        relation::create_index(
            self.db,
            E::default(),
            E::CODE_INDEX,
            &[E::code_column()],
            true,
        )
        .await?;

        tracing::debug!(relation = E::RELATION, rows, "support relation rebuilt");

        Ok(rows)
    }

    async fn destroy_relation(&self) -> Result<(), ImportError> {
        relation::drop_relation(self.db, E::default()).await?;

        Ok(())
    }
}
