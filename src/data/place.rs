//! Place gazetteer repository.
//!
//! Places ship as a directory of delimited files rather than a single CSV;
//! every file in the directory is ingested, in path order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use sea_orm::{ActiveValue, ConnectionTrait, EntityTrait, PaginatorTrait};

use crate::data::{
    lifecycle::ReferenceEntity,
    relation::{self, relation_name},
};
use crate::error::{source::SourceError, ImportError};
use crate::geo::grid_to_wgs84;
use crate::ingest::{self, RowReader, INSERT_BATCH_SIZE};
use crate::source::{places::PlaceRecord, ImportSource};

pub struct PlaceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PlaceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn count(&self) -> Result<u64, ImportError> {
        Ok(entity::prelude::Place::find().count(self.db).await?)
    }

    async fn seed(&self, places_dir: &Path) -> Result<u64, ImportError> {
        if !places_dir.is_dir() {
            return Err(SourceError::Missing(places_dir.to_path_buf()).into());
        }

        let mut files: Vec<PathBuf> = fs::read_dir(places_dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        let mut inserted = 0;
        for file in &files {
            inserted += self.seed_file(file).await?;
        }

        Ok(inserted)
    }

    async fn seed_file(&self, path: &Path) -> Result<u64, ImportError> {
        let reader = RowReader::open(path)?;
        let mut inserted = 0;

        for batch in ingest::batches(
            reader,
            |line, record| PlaceRecord::parse(line, record).map(|place| Some(active_model(place))),
            INSERT_BATCH_SIZE,
        ) {
            let batch = batch?;
            inserted += batch.len() as u64;
            entity::prelude::Place::insert_many(batch).exec(self.db).await?;
        }

        Ok(inserted)
    }
}

#[async_trait]
impl<'a, C: ConnectionTrait> ReferenceEntity for PlaceRepository<'a, C> {
    fn relation(&self) -> &'static str {
        relation_name::PLACES
    }

    async fn setup_table(&self, source: &ImportSource) -> Result<u64, ImportError> {
        relation::drop_relation(self.db, entity::prelude::Place).await?;
        relation::create_relation(self.db, entity::prelude::Place).await?;

        let rows = self.seed(&source.places_dir).await?;

        relation::create_index(
            self.db,
            entity::prelude::Place,
            "idx_places_outcode",
            &[entity::place::Column::Outcode],
            false,
        )
        .await?;

        tracing::debug!(rows, "place relation rebuilt");

        Ok(rows)
    }

    async fn destroy_relation(&self) -> Result<(), ImportError> {
        relation::drop_relation(self.db, entity::prelude::Place).await?;

        Ok(())
    }
}

fn active_model(place: PlaceRecord) -> entity::place::ActiveModel {
    let position = grid_to_wgs84(f64::from(place.eastings), f64::from(place.northings));

    entity::place::ActiveModel {
        code: ActiveValue::Set(place.code),
        name_1: ActiveValue::Set(place.name_1),
        name_1_lang: ActiveValue::Set(place.name_1_lang),
        name_2: ActiveValue::Set(place.name_2),
        name_2_lang: ActiveValue::Set(place.name_2_lang),
        local_type: ActiveValue::Set(place.local_type),
        outcode: ActiveValue::Set(place.outcode),
        county_unitary: ActiveValue::Set(place.county_unitary),
        county_unitary_type: ActiveValue::Set(place.county_unitary_type),
        district_borough: ActiveValue::Set(place.district_borough),
        district_borough_type: ActiveValue::Set(place.district_borough_type),
        region: ActiveValue::Set(place.region),
        country: ActiveValue::Set(place.country),
        eastings: ActiveValue::Set(place.eastings),
        northings: ActiveValue::Set(place.northings),
        min_eastings: ActiveValue::Set(place.min_eastings),
        min_northings: ActiveValue::Set(place.min_northings),
        max_eastings: ActiveValue::Set(place.max_eastings),
        max_northings: ActiveValue::Set(place.max_northings),
        longitude: ActiveValue::Set(Some(position.longitude)),
        latitude: ActiveValue::Set(Some(position.latitude)),
        ..Default::default()
    }
}
