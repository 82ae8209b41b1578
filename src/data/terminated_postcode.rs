//! Terminated postcode repository.
//!
//! Rows from the same directory CSV whose termination date is set. They are
//! geocoded inline at ingest instead of through a later pass, since the
//! relation never participates in the geolocation stage.

use async_trait::async_trait;
use sea_orm::{ActiveValue, ConnectionTrait, EntityTrait, PaginatorTrait};

use crate::data::{
    lifecycle::ReferenceEntity,
    relation::{self, relation_name},
};
use crate::error::ImportError;
use crate::geo::grid_to_wgs84;
use crate::ingest::{self, RowReader, INSERT_BATCH_SIZE};
use crate::source::{onspd::PostcodeRecord, ImportSource};

pub struct TerminatedPostcodeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TerminatedPostcodeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn count(&self) -> Result<u64, ImportError> {
        Ok(entity::prelude::TerminatedPostcode::find()
            .count(self.db)
            .await?)
    }
}

#[async_trait]
impl<'a, C: ConnectionTrait> ReferenceEntity for TerminatedPostcodeRepository<'a, C> {
    fn relation(&self) -> &'static str {
        relation_name::TERMINATED_POSTCODES
    }

    async fn setup_table(&self, source: &ImportSource) -> Result<u64, ImportError> {
        relation::drop_relation(self.db, entity::prelude::TerminatedPostcode).await?;
        relation::create_relation(self.db, entity::prelude::TerminatedPostcode).await?;

        let reader = RowReader::open(&source.postcodes)?;
        let mut inserted = 0;

        for batch in ingest::batches(
            reader,
            |line, record| {
                let row = PostcodeRecord::parse(line, record)?;
                Ok(active_model(row))
            },
            INSERT_BATCH_SIZE,
        ) {
            let batch = batch?;
            inserted += batch.len() as u64;
            entity::prelude::TerminatedPostcode::insert_many(batch)
                .exec(self.db)
                .await?;
        }

        relation::create_index(
            self.db,
            entity::prelude::TerminatedPostcode,
            "idx_terminated_postcodes_pc_compact",
            &[entity::terminated_postcode::Column::PcCompact],
            true,
        )
        .await?;

        tracing::info!(rows = inserted, "terminated postcode relation rebuilt");

        Ok(inserted)
    }

    async fn destroy_relation(&self) -> Result<(), ImportError> {
        relation::drop_relation(self.db, entity::prelude::TerminatedPostcode).await?;

        Ok(())
    }
}

/// Builds the row for a terminated postcode; live rows map to `None`.
fn active_model(row: PostcodeRecord) -> Option<entity::terminated_postcode::ActiveModel> {
    let termination = row.termination?;
    let position = grid_to_wgs84(f64::from(row.eastings), f64::from(row.northings));

    Some(entity::terminated_postcode::ActiveModel {
        postcode: ActiveValue::Set(row.postcode),
        pc_compact: ActiveValue::Set(row.pc_compact),
        year_terminated: ActiveValue::Set(termination.year),
        month_terminated: ActiveValue::Set(termination.month),
        eastings: ActiveValue::Set(row.eastings),
        northings: ActiveValue::Set(row.northings),
        longitude: ActiveValue::Set(Some(position.longitude)),
        latitude: ActiveValue::Set(Some(position.latitude)),
        ..Default::default()
    })
}
