//! Outcode aggregate repository.
//!
//! One row per distinct outward code, derived from the seeded postcode
//! relation: mean grid position, mean coordinates, and the sorted set of
//! administrative codes observed across the outcode.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use sea_orm::{ActiveValue, ConnectionTrait, EntityTrait, PaginatorTrait};

use crate::data::{
    lifecycle::ReferenceEntity,
    relation::{self, relation_name},
};
use crate::error::ImportError;
use crate::geo::grid_to_wgs84;
use crate::ingest::INSERT_BATCH_SIZE;
use crate::source::ImportSource;

pub struct OutcodeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OutcodeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn count(&self) -> Result<u64, ImportError> {
        Ok(entity::prelude::Outcode::find().count(self.db).await?)
    }

    /// Folds the postcode relation into per-outcode accumulators and
    /// inserts the aggregate rows. Returns the number of outcodes written.
    async fn aggregate(&self) -> Result<u64, ImportError> {
        const PAGE_SIZE: u64 = 1000;

        let mut accumulators: BTreeMap<String, OutcodeAccumulator> = BTreeMap::new();
        let mut pages = entity::prelude::Postcode::find().paginate(self.db, PAGE_SIZE);
        while let Some(rows) = pages.fetch_and_next().await? {
            for row in rows {
                accumulators
                    .entry(row.outcode.clone())
                    .or_default()
                    .fold(&row);
            }
        }

        let models: Vec<entity::outcode::ActiveModel> = accumulators
            .into_iter()
            .map(|(outcode, accumulator)| accumulator.into_model(outcode))
            .collect();
        let rows = models.len() as u64;

        for chunk in models.chunks(INSERT_BATCH_SIZE) {
            entity::prelude::Outcode::insert_many(chunk.to_vec())
                .exec(self.db)
                .await?;
        }

        Ok(rows)
    }
}

#[async_trait]
impl<'a, C: ConnectionTrait> ReferenceEntity for OutcodeRepository<'a, C> {
    fn relation(&self) -> &'static str {
        relation_name::OUTCODES
    }

    async fn setup_table(&self, _source: &ImportSource) -> Result<u64, ImportError> {
        relation::drop_relation(self.db, entity::prelude::Outcode).await?;
        relation::create_relation(self.db, entity::prelude::Outcode).await?;

        let rows = self.aggregate().await?;

        relation::create_index(
            self.db,
            entity::prelude::Outcode,
            "idx_outcodes_outcode",
            &[entity::outcode::Column::Outcode],
            true,
        )
        .await?;

        tracing::info!(rows, "outcode relation rebuilt");

        Ok(rows)
    }

    async fn destroy_relation(&self) -> Result<(), ImportError> {
        relation::drop_relation(self.db, entity::prelude::Outcode).await?;

        Ok(())
    }
}

/// Running aggregate for one outcode.
#[derive(Default)]
struct OutcodeAccumulator {
    rows: u64,
    eastings_sum: i64,
    northings_sum: i64,
    geocoded: u64,
    longitude_sum: f64,
    latitude_sum: f64,
    admin_district: BTreeSet<String>,
    admin_county: BTreeSet<String>,
    admin_ward: BTreeSet<String>,
    parish: BTreeSet<String>,
    country: BTreeSet<String>,
}

impl OutcodeAccumulator {
    fn fold(&mut self, row: &entity::postcode::Model) {
        self.rows += 1;
        self.eastings_sum += i64::from(row.eastings);
        self.northings_sum += i64::from(row.northings);
        if let (Some(longitude), Some(latitude)) = (row.longitude, row.latitude) {
            self.geocoded += 1;
            self.longitude_sum += longitude;
            self.latitude_sum += latitude;
        }
        extend_codes(&mut self.admin_district, &row.admin_district);
        extend_codes(&mut self.admin_county, &row.admin_county);
        extend_codes(&mut self.admin_ward, &row.admin_ward);
        extend_codes(&mut self.parish, &row.parish);
        extend_codes(&mut self.country, &row.country);
    }

    fn into_model(self, outcode: String) -> entity::outcode::ActiveModel {
        let eastings = (self.eastings_sum / self.rows as i64) as i32;
        let northings = (self.northings_sum / self.rows as i64) as i32;

        // Mean of the geocoded rows; a fully ungeocoded outcode falls back
        // to converting its mean grid position.
        let (longitude, latitude) = if self.geocoded > 0 {
            (
                self.longitude_sum / self.geocoded as f64,
                self.latitude_sum / self.geocoded as f64,
            )
        } else {
            let position = grid_to_wgs84(f64::from(eastings), f64::from(northings));
            (position.longitude, position.latitude)
        };

        entity::outcode::ActiveModel {
            outcode: ActiveValue::Set(outcode),
            eastings: ActiveValue::Set(eastings),
            northings: ActiveValue::Set(northings),
            longitude: ActiveValue::Set(longitude),
            latitude: ActiveValue::Set(latitude),
            admin_district: ActiveValue::Set(code_list(self.admin_district)),
            admin_county: ActiveValue::Set(code_list(self.admin_county)),
            admin_ward: ActiveValue::Set(code_list(self.admin_ward)),
            parish: ActiveValue::Set(code_list(self.parish)),
            country: ActiveValue::Set(code_list(self.country)),
            ..Default::default()
        }
    }
}

fn extend_codes(set: &mut BTreeSet<String>, code: &Option<String>) {
    if let Some(code) = code {
        set.insert(code.clone());
    }
}

/// Sorted unique code list as a JSON array column value.
fn code_list(codes: BTreeSet<String>) -> serde_json::Value {
    serde_json::Value::Array(codes.into_iter().map(serde_json::Value::String).collect())
}
