//! The staged import pipeline.
//!
//! One `ImportPipeline` value performs one run: the nine stages execute
//! strictly in order, the first error aborts the run, and a single
//! best-effort rollback destroys the primary relation together with every
//! relation the completed stages created. Rollback failures are collected
//! and reported alongside the original error, never in place of it.

use std::time::{Duration, Instant};

use futures::future::join_all;
use sea_orm::ConnectionTrait;
use thiserror::Error;

use crate::data::{
    attribute::{
        CcgRepository, ConstituencyRepository, CountyRepository, DistrictRepository,
        NutsRepository, ParishRepository, WardRepository,
    },
    lifecycle::ReferenceEntity,
    outcode::OutcodeRepository,
    place::PlaceRepository,
    postcode::PostcodeRepository,
    relation::{self, relation_name},
    terminated_postcode::TerminatedPostcodeRepository,
};
use crate::error::{store::RollbackError, ImportError};
use crate::source::ImportSource;

use super::stage::Stage;

/// Where a pipeline run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running(Stage),
    Succeeded,
    Failed(Stage),
}

/// Row counts and elapsed wall time of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub postcodes_seeded: u64,
    pub postcodes_geocoded: u64,
    pub outcodes: u64,
    pub terminated_postcodes: u64,
    pub elapsed: Duration,
}

/// Report of a failed run.
#[derive(Debug, Error)]
#[error("import failed during {stage}: {source}")]
pub struct StageFailure {
    pub stage: Stage,
    #[source]
    pub source: ImportError,
    pub rollback_errors: Vec<RollbackError>,
}

/// The staged import run over one connection and one source tree.
pub struct ImportPipeline<'a, C: ConnectionTrait> {
    db: &'a C,
    source: ImportSource,
    state: PipelineState,
    completed: Vec<Stage>,
    postcodes_seeded: u64,
    postcodes_geocoded: u64,
    outcodes: u64,
    terminated_postcodes: u64,
}

impl<'a, C: ConnectionTrait> ImportPipeline<'a, C> {
    pub fn new(db: &'a C, source: ImportSource) -> Self {
        Self {
            db,
            source,
            state: PipelineState::Idle,
            completed: Vec::new(),
            postcodes_seeded: 0,
            postcodes_geocoded: 0,
            outcodes: 0,
            terminated_postcodes: 0,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Stages that have run to completion, in execution order.
    pub fn completed_stages(&self) -> &[Stage] {
        &self.completed
    }

    /// Executes the stages strictly in order.
    pub async fn run(&mut self) -> Result<RunSummary, StageFailure> {
        let started = Instant::now();

        for stage in Stage::ORDER {
            self.state = PipelineState::Running(stage);
            tracing::info!(stage = %stage, "stage starting");

            if let Err(source) = self.execute(stage).await {
                tracing::error!(stage = %stage, error = %source, "stage failed");
                let rollback_errors = self.rollback(stage).await;
                self.state = PipelineState::Failed(stage);

                return Err(StageFailure {
                    stage,
                    source,
                    rollback_errors,
                });
            }

            self.completed.push(stage);
            tracing::info!(stage = %stage, "stage complete");
        }

        self.state = PipelineState::Succeeded;

        Ok(RunSummary {
            postcodes_seeded: self.postcodes_seeded,
            postcodes_geocoded: self.postcodes_geocoded,
            outcodes: self.outcodes,
            terminated_postcodes: self.terminated_postcodes,
            elapsed: started.elapsed(),
        })
    }

    async fn execute(&mut self, stage: Stage) -> Result<(), ImportError> {
        match stage {
            Stage::TeardownPostcodes => PostcodeRepository::new(self.db).destroy_relation().await,
            Stage::EnableSpatialExtension => relation::enable_spatial_extension(self.db).await,
            Stage::SetupSupportTables => self.setup_support_tables().await,
            Stage::CreatePostcodeRelation => {
                PostcodeRepository::new(self.db).create_relation().await
            }
            Stage::SeedPostcodes => {
                self.postcodes_seeded = PostcodeRepository::new(self.db)
                    .seed(&self.source.postcodes)
                    .await?;
                Ok(())
            }
            Stage::PopulateLocation => {
                self.postcodes_geocoded =
                    PostcodeRepository::new(self.db).populate_location().await?;
                Ok(())
            }
            Stage::RebuildIndexes => PostcodeRepository::new(self.db).create_indexes().await,
            Stage::BuildOutcodes => {
                self.outcodes = OutcodeRepository::new(self.db)
                    .setup_table(&self.source)
                    .await?;
                Ok(())
            }
            Stage::BuildTerminatedPostcodes => {
                self.terminated_postcodes = TerminatedPostcodeRepository::new(self.db)
                    .setup_table(&self.source)
                    .await?;
                Ok(())
            }
        }
    }

    /// Rebuilds the support group concurrently; one failure aborts the
    /// whole group.
    async fn setup_support_tables(&self) -> Result<(), ImportError> {
        let district = DistrictRepository::new(self.db);
        let county = CountyRepository::new(self.db);
        let ccg = CcgRepository::new(self.db);
        let ward = WardRepository::new(self.db);
        let nuts = NutsRepository::new(self.db);
        let parish = ParishRepository::new(self.db);
        let constituency = ConstituencyRepository::new(self.db);
        let place = PlaceRepository::new(self.db);

        let results = join_all([
            district.setup_table(&self.source),
            county.setup_table(&self.source),
            ccg.setup_table(&self.source),
            ward.setup_table(&self.source),
            nuts.setup_table(&self.source),
            parish.setup_table(&self.source),
            constituency.setup_table(&self.source),
            place.setup_table(&self.source),
        ])
        .await;

        for result in results {
            result?;
        }

        Ok(())
    }

    /// Best-effort teardown after a failure: the primary relation plus
    /// every relation the completed stages and the failed stage created.
    async fn rollback(&mut self, failed: Stage) -> Vec<RollbackError> {
        let mut targets: Vec<&'static str> = vec![relation_name::POSTCODES];
        for stage in self.completed.iter().copied().chain([failed]) {
            for relation in stage.relations_created() {
                if !targets.contains(relation) {
                    targets.push(*relation);
                }
            }
        }

        let mut errors = Vec::new();
        for target in targets {
            tracing::warn!(relation = target, "rolling back relation");
            if let Err(source) = relation::drop_relation_by_name(self.db, target).await {
                tracing::error!(relation = target, error = %source, "rollback drop failed");
                errors.push(RollbackError {
                    relation: target,
                    source,
                });
            }
        }

        errors
    }
}
