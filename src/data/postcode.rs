//! Primary postcode relation repository.

use std::path::Path;

use async_trait::async_trait;
use sea_orm::{
    sea_query::{CaseStatement, Expr},
    ActiveValue, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, Statement,
};

use crate::data::{
    lifecycle::ReferenceEntity,
    relation::{self, relation_name},
};
use crate::error::ImportError;
use crate::geo::grid_to_wgs84;
use crate::ingest::{self, RowReader, INSERT_BATCH_SIZE};
use crate::source::{onspd::PostcodeRecord, ImportSource};

/// Names of the indexes the rebuild stage manages.
pub mod index_name {
    pub const POSTCODE: &str = "idx_postcodes_postcode";
    pub const PC_COMPACT: &str = "idx_postcodes_pc_compact";
    pub const OUTCODE: &str = "idx_postcodes_outcode";
    pub const LOCATION: &str = "idx_postcodes_location";
}

pub struct PostcodeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PostcodeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create_relation(&self) -> Result<(), ImportError> {
        relation::create_relation(self.db, entity::prelude::Postcode).await
    }

    /// Streams the directory CSV into the relation, live rows only.
    ///
    /// Terminated rows are filtered out here; they belong to the terminated
    /// relation. The first malformed row aborts the whole load.
    pub async fn seed(&self, source: &Path) -> Result<u64, ImportError> {
        let reader = RowReader::open(source)?;
        let mut inserted = 0;

        for batch in ingest::batches(
            reader,
            |line, record| {
                let row = PostcodeRecord::parse(line, record)?;
                Ok(row.is_live().then(|| active_model(row)))
            },
            INSERT_BATCH_SIZE,
        ) {
            let batch = batch?;
            inserted += batch.len() as u64;
            entity::prelude::Postcode::insert_many(batch)
                .exec(self.db)
                .await?;
            tracing::debug!(total = inserted, "postcode batch inserted");
        }

        tracing::info!(rows = inserted, "postcode relation seeded");

        Ok(inserted)
    }

    /// Geocodes every row still missing a longitude, in fixed-size update
    /// batches, until none remain. Returns the number of rows written.
    pub async fn populate_location(&self) -> Result<u64, ImportError> {
        const GEOCODE_BATCH_SIZE: u64 = 500;

        let mut updated = 0;

        loop {
            let rows = entity::prelude::Postcode::find()
                .select_only()
                .column(entity::postcode::Column::Id)
                .column(entity::postcode::Column::Eastings)
                .column(entity::postcode::Column::Northings)
                .filter(entity::postcode::Column::Longitude.is_null())
                .limit(GEOCODE_BATCH_SIZE)
                .into_tuple::<(i32, i32, i32)>()
                .all(self.db)
                .await?;

            if rows.is_empty() {
                break;
            }

            let ids: Vec<i32> = rows.iter().map(|(id, _, _)| *id).collect();
            let mut longitudes = CaseStatement::new();
            let mut latitudes = CaseStatement::new();
            for (id, eastings, northings) in &rows {
                let position = grid_to_wgs84(f64::from(*eastings), f64::from(*northings));
                longitudes = longitudes.case(
                    entity::postcode::Column::Id.eq(*id),
                    Expr::value(position.longitude),
                );
                latitudes = latitudes.case(
                    entity::postcode::Column::Id.eq(*id),
                    Expr::value(position.latitude),
                );
            }

            let result = entity::prelude::Postcode::update_many()
                .col_expr(entity::postcode::Column::Longitude, Expr::value(longitudes))
                .col_expr(entity::postcode::Column::Latitude, Expr::value(latitudes))
                .filter(entity::postcode::Column::Id.is_in(ids))
                .exec(self.db)
                .await?;

            updated += result.rows_affected;
            tracing::debug!(total = updated, "geocoded postcode batch");
        }

        Ok(updated)
    }

    /// Drops and recreates the relation's indexes.
    pub async fn create_indexes(&self) -> Result<(), ImportError> {
        for name in [
            index_name::POSTCODE,
            index_name::PC_COMPACT,
            index_name::OUTCODE,
            index_name::LOCATION,
        ] {
            relation::drop_index(self.db, name).await?;
        }

        relation::create_index(
            self.db,
            entity::prelude::Postcode,
            index_name::POSTCODE,
            &[entity::postcode::Column::Postcode],
            true,
        )
        .await?;
        relation::create_index(
            self.db,
            entity::prelude::Postcode,
            index_name::PC_COMPACT,
            &[entity::postcode::Column::PcCompact],
            false,
        )
        .await?;
        relation::create_index(
            self.db,
            entity::prelude::Postcode,
            index_name::OUTCODE,
            &[entity::postcode::Column::Outcode],
            false,
        )
        .await?;
        self.create_location_index().await?;

        Ok(())
    }

    /// The spatial index is a GIST expression index on Postgres; elsewhere a
    /// composite btree over the coordinate columns stands in.
    async fn create_location_index(&self) -> Result<(), ImportError> {
        match self.db.get_database_backend() {
            DbBackend::Postgres => {
                self.db
                    .execute_raw(Statement::from_string(
                        DbBackend::Postgres,
                        format!(
                            "CREATE INDEX {} ON postcodes USING GIST \
                             (ST_SetSRID(ST_MakePoint(longitude, latitude), 4326))",
                            index_name::LOCATION
                        ),
                    ))
                    .await?;
            }
            _ => {
                relation::create_index(
                    self.db,
                    entity::prelude::Postcode,
                    index_name::LOCATION,
                    &[
                        entity::postcode::Column::Longitude,
                        entity::postcode::Column::Latitude,
                    ],
                    false,
                )
                .await?;
            }
        }

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, ImportError> {
        Ok(entity::prelude::Postcode::find().count(self.db).await?)
    }
}

#[async_trait]
impl<'a, C: ConnectionTrait> ReferenceEntity for PostcodeRepository<'a, C> {
    fn relation(&self) -> &'static str {
        relation_name::POSTCODES
    }

    async fn setup_table(&self, source: &ImportSource) -> Result<u64, ImportError> {
        self.destroy_relation().await?;
        self.create_relation().await?;
        self.seed(&source.postcodes).await
    }

    async fn destroy_relation(&self) -> Result<(), ImportError> {
        relation::drop_relation(self.db, entity::prelude::Postcode).await?;

        Ok(())
    }
}

fn active_model(row: PostcodeRecord) -> entity::postcode::ActiveModel {
    entity::postcode::ActiveModel {
        postcode: ActiveValue::Set(row.postcode),
        pc_compact: ActiveValue::Set(row.pc_compact),
        outcode: ActiveValue::Set(row.outcode),
        incode: ActiveValue::Set(row.incode),
        eastings: ActiveValue::Set(row.eastings),
        northings: ActiveValue::Set(row.northings),
        quality: ActiveValue::Set(row.quality),
        usertype: ActiveValue::Set(row.usertype),
        date_introduced: ActiveValue::Set(row.date_introduced),
        country: ActiveValue::Set(row.country),
        region: ActiveValue::Set(row.region),
        admin_district: ActiveValue::Set(row.district),
        admin_county: ActiveValue::Set(row.county),
        admin_ward: ActiveValue::Set(row.ward),
        parish: ActiveValue::Set(row.parish),
        ccg: ActiveValue::Set(row.ccg),
        nuts: ActiveValue::Set(row.nuts),
        constituency: ActiveValue::Set(row.constituency),
        ..Default::default()
    }
}
