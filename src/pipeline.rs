use crate::config::Config;
use crate::constants::COMPLETION_MESSAGE;
use crate::error::ScraperError;
use crate::normalize::RateNormalizer;
use crate::parser::Page;
use crate::render::Renderer;
use crate::sanitize;
use crate::sheet::SheetBuilder;
use crate::sources::PageSource;
use crate::types::{Artifacts, YearKey};
use std::fmt;
use tracing::{error, info, instrument, warn};

/// Steps of a run, in the only order they ever execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Extract,
    Build,
    Normalize,
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Extract => "extract",
            Stage::Build => "build",
            Stage::Normalize => "normalize",
            Stage::Render => "render",
        };
        f.write_str(name)
    }
}

/// How a single year's run ended.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(Artifacts),
    Aborted { stage: Stage, reason: String },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }

    pub fn aborted_at(&self) -> Option<Stage> {
        match self {
            RunOutcome::Aborted { stage, .. } => Some(*stage),
            RunOutcome::Completed(_) => None,
        }
    }
}

/// Result of a multi-year run
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub completed: Vec<(YearKey, Artifacts)>,
    pub aborted: Vec<(YearKey, Stage, String)>,
}

struct StageFailure {
    stage: Stage,
    error: ScraperError,
}

fn at(stage: Stage) -> impl FnOnce(ScraperError) -> StageFailure {
    move |error| StageFailure { stage, error }
}

pub struct Pipeline {
    builder: SheetBuilder,
    normalizer: RateNormalizer,
    renderer: Renderer,
}

impl Pipeline {
    pub fn new(builder: SheetBuilder, normalizer: RateNormalizer, renderer: Renderer) -> Self {
        Self {
            builder,
            normalizer,
            renderer,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SheetBuilder::new(config.output.dir.clone()),
            RateNormalizer::from_config(&config.columns),
            Renderer::from_config(config),
        )
    }

    /// Fetch → extract → build → normalize → render for one year.
    ///
    /// Every failure is logged here and reported as [`RunOutcome::Aborted`];
    /// nothing escapes to the caller.
    #[instrument(skip(self, source), fields(year = %year, source = source.source_name()))]
    pub async fn run(&self, source: &dyn PageSource, year: &YearKey) -> RunOutcome {
        info!("🚀 Starting pipeline for {}", source.location(year));
        match self.run_stages(source, year).await {
            Ok(artifacts) => {
                info!(
                    "✅ Finished: {} and {}",
                    artifacts.spreadsheet.display(),
                    artifacts.image.display()
                );
                RunOutcome::Completed(artifacts)
            }
            Err(StageFailure { stage, error }) => {
                error!(stage = %stage, "Pipeline aborted: {}", error);
                RunOutcome::Aborted {
                    stage,
                    reason: error.to_string(),
                }
            }
        }
    }

    async fn run_stages(
        &self,
        source: &dyn PageSource,
        year: &YearKey,
    ) -> std::result::Result<Artifacts, StageFailure> {
        let html = source.fetch_html(year).await.map_err(at(Stage::Fetch))?;
        let page = Page::parse(&html).map_err(at(Stage::Fetch))?;
        drop(html);

        let records = page.cells().map_err(at(Stage::Extract))?;
        let Page { title, .. } = page;
        info!("Found '{}' with {} cells", title, records.len());

        let stem = sanitize::file_stem(&title, &format!("year-{year}"));
        if stem != title {
            warn!("Title '{}' written to disk as '{}'", title, stem);
        }

        let spreadsheet = self
            .builder
            .build(&stem, &records)
            .map_err(at(Stage::Build))?;

        let table = self
            .normalizer
            .normalize_file(&spreadsheet)
            .map_err(at(Stage::Normalize))?;

        let image = Renderer::image_path(self.builder.output_dir(), &stem);
        self.renderer
            .render(&table, &spreadsheet, &image)
            .map_err(at(Stage::Render))?;

        Ok(Artifacts {
            title,
            spreadsheet,
            image,
        })
    }

    /// Run each year in turn. A failed year is recorded and the loop moves on.
    pub async fn run_years<I>(&self, source: &dyn PageSource, years: I) -> BatchSummary
    where
        I: IntoIterator<Item = YearKey>,
    {
        let mut summary = BatchSummary::default();
        for year in years {
            match self.run(source, &year).await {
                RunOutcome::Completed(artifacts) => {
                    println!("{COMPLETION_MESSAGE}");
                    summary.completed.push((year, artifacts));
                }
                RunOutcome::Aborted { stage, reason } => {
                    warn!(year = %year, stage = %stage, "Skipping year");
                    summary.aborted.push((year, stage, reason));
                }
            }
        }
        info!(
            "Processed {} years: {} completed, {} aborted",
            summary.completed.len() + summary.aborted.len(),
            summary.completed.len(),
            summary.aborted.len()
        );
        summary
    }
}
