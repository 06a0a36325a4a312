//! Graph command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::{debug, info};

use crate::config::GraphOptions;
use crate::document::DocumentLoader;
use crate::executors::CommandExecutor;
use crate::graph::{FactoryGraphBuilder, GraphRenderer};
use crate::groups::Groups;
use crate::interpolation::Interpolator;
use crate::store::ConfigStore;

pub struct GraphExecutor;

impl GraphExecutor {
    /// Load every input named by `config` and write the DOT graph to `output`
    pub fn generate(config: &GraphOptions, output: &mut dyn Write) -> Result<()> {
        let mut store = ConfigStore::with_application_defaults(&config.config_dir);
        for path in &config.ini {
            store
                .load_file(path)
                .wrap_err_with(|| format!("Failed to load configuration '{}'", path.display()))?;
        }

        let groups = match config.groups.as_ref() {
            Some(path) => Groups::load_file(path)
                .wrap_err_with(|| format!("Failed to load groups '{}'", path.display()))?,
            None => Groups::default(),
        };

        let document =
            DocumentLoader::load_all(&config.sources).wrap_err("Failed to load factory files")?;

        let interpolator = Interpolator::new(&store, config.max_depth)?;

        let mut builder =
            FactoryGraphBuilder::new(&document, &interpolator, &groups, config.show_unused);
        builder.build().map_err(|error| {
            let context = if error.is_resolution_error() {
                "Failed to resolve the factory wiring"
            } else {
                "Failed to build the factory graph"
            };
            miette::Report::new(error).wrap_err(context)
        })?;

        info!("generating graph");
        GraphRenderer::new()
            .render_dot(builder.graph(), output)
            .wrap_err("Failed to render DOT graph")?;

        info!(
            "generation successful for {} ({} nodes, {} edges, {} skipped)",
            document.sources().join(", "),
            builder.graph().node_count(),
            builder.graph().edge_count(),
            builder.skipped().len()
        );
        debug!("{} interpolated values cached", interpolator.cached_count());
        Ok(())
    }
}

impl CommandExecutor for GraphExecutor {
    type Config = GraphOptions;

    fn execute(config: Self::Config) -> Result<()> {
        // The output file is only created once the whole graph has rendered
        let mut dot = Vec::new();
        Self::generate(&config, &mut dot)?;

        let Some(output_path) = config.output else {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&dot)
                .and_then(|()| stdout.flush())
                .into_diagnostic()
                .wrap_err("Failed to write graph to stdout")?;
            return Ok(());
        };

        let mut output_writer = BufWriter::new(
            File::create(&output_path)
                .into_diagnostic()
                .wrap_err_with(|| {
                    format!("Failed to create output file '{}'", output_path.display())
                })?,
        );
        output_writer
            .write_all(&dot)
            .and_then(|()| output_writer.flush())
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write output file '{}'", output_path.display()))?;

        eprintln!(
            "{} Graph written to {}",
            style("✓").green(),
            style(output_path.display()).bold()
        );

        Ok(())
    }
}
