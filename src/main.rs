use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use fieldscout::cli::path_mapping::map_input_to_output;
use fieldscout::cli::{handle_error, init_tracing, Args, CliConfig, CliUtils};
use fieldscout::discovery::{DiscoveryEngine, DiscoveryMetadata, DiscoveryStats};
use fieldscout::formatter::{CatalogFormatter, OutputFormat};
use fieldscout::parser::directory::find_json_files;
use fieldscout::{DiscoveryError, JsonSource};

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<DiscoveryError>() {
                Some(discovery_error) => handle_error(discovery_error),
                None => CliUtils::show_error(&format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = CliConfig::from_args(args)?;
    let engine = DiscoveryEngine::new(config.discovery_config.clone())?;

    match config.source()? {
        JsonSource::Directory(dir) => discover_directory(&dir, &config, &engine),
        source => discover_single(&source, &config, &engine),
    }
}

/// Discover one document and write its catalog to the output file or stdout
fn discover_single(source: &JsonSource, config: &CliConfig, engine: &DiscoveryEngine) -> Result<()> {
    debug!(source = %source.description(), "reading input");
    let start = Instant::now();

    let value = source.parse_with(&config.parse_options)?;
    let mut result = engine.discover(&value);
    result.catalog.retain_types(&config.type_filter);

    let format = config.output_format(false);
    let rendered = formatter_for(config, format).format(&result.catalog)?;

    if let Some(output_path) = &config.args.output {
        write_output(output_path, &rendered)?;
        CliUtils::show_success(
            &format!("Wrote {} fields to: {}", result.catalog.len(), output_path.display()),
            config.is_quiet(),
        );
    } else {
        println!("{}", rendered);
    }

    if config.want_stats() && !config.is_quiet() {
        output_statistics(&result.metadata.stats, result.catalog.len(), start);
    }

    Ok(())
}

/// Discover every JSON file under `input_dir`
fn discover_directory(input_dir: &Path, config: &CliConfig, engine: &DiscoveryEngine) -> Result<()> {
    let json_files = find_json_files(input_dir, config.args.recursive)
        .with_context(|| format!("Failed finding JSON files in {}", input_dir.display()))?;

    if json_files.is_empty() {
        CliUtils::show_warning(
            &format!("No JSON files found in {}", input_dir.display()),
            config.is_quiet(),
        );
        return Ok(());
    }

    info!(count = json_files.len(), dir = %input_dir.display(), "discovering directory");

    if let Some(output_dir) = &config.args.output {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    }

    let progress = (!config.is_quiet() && config.args.output.is_some() && CliUtils::is_interactive())
        .then(|| CliUtils::create_progress_bar(json_files.len() as u64));

    let start = Instant::now();
    let format = config.output_format(true);
    let mut failures = 0usize;
    let mut total_stats = DiscoveryStats::default();
    let mut total_fields = 0usize;

    for json_file in &json_files {
        let relative_path = json_file.strip_prefix(input_dir).unwrap_or(json_file);
        if let Some(pb) = &progress {
            pb.set_message(relative_path.display().to_string());
        }

        match discover_file(json_file, input_dir, config, engine, format) {
            Ok((written, metadata)) => {
                total_stats.absorb(&metadata.stats);
                total_fields += metadata.field_count;
                if let (Some(output_file), None) = (written, &progress) {
                    CliUtils::show_success(
                        &format!("{} -> {}", relative_path.display(), output_file.display()),
                        config.is_quiet(),
                    );
                }
            }
            Err(e) => {
                failures += 1;
                let message = match e.downcast_ref::<DiscoveryError>() {
                    Some(discovery_error) => discovery_error.user_message(),
                    None => format!("{:#}", e),
                };
                CliUtils::show_error(&format!("{}: {}", relative_path.display(), message));
                if !config.continue_on_error() {
                    if let Some(pb) = &progress {
                        pb.abandon();
                    }
                    return Err(e.context(format!(
                        "Aborting after error in {}",
                        relative_path.display()
                    )));
                }
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }

    if config.want_stats() && !config.is_quiet() {
        output_statistics(&total_stats, total_fields, start);
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files failed", failures, json_files.len());
    }

    Ok(())
}

/// Discover one file of a directory run; returns the catalog path when written
fn discover_file(
    json_file: &Path,
    input_dir: &Path,
    config: &CliConfig,
    engine: &DiscoveryEngine,
    format: OutputFormat,
) -> Result<(Option<PathBuf>, DiscoveryMetadata)> {
    let value = JsonSource::File(json_file.to_path_buf()).parse_with(&config.parse_options)?;
    let mut result = engine.discover(&value);
    result.catalog.retain_types(&config.type_filter);
    result.metadata.field_count = result.catalog.len();

    match &config.args.output {
        Some(output_dir) => {
            let output_file = map_input_to_output(input_dir, json_file, output_dir);
            let rendered = formatter_for(config, format).format(&result.catalog)?;
            write_output(&output_file, &rendered)?;
            Ok((Some(output_file), result.metadata))
        }
        None => {
            let rendered = formatter_for(config, format).format(&result.catalog)?;
            let relative_path = json_file.strip_prefix(input_dir).unwrap_or(json_file);
            println!("== {}\n{}", relative_path.display(), rendered);
            Ok((None, result.metadata))
        }
    }
}

fn formatter_for(config: &CliConfig, format: OutputFormat) -> CatalogFormatter {
    CatalogFormatter::new(format)
        .with_color(config.use_color())
        .with_width(CliUtils::terminal_width())
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn output_statistics(stats: &DiscoveryStats, field_count: usize, start: Instant) {
    eprintln!(
        "\n{}",
        CliUtils::format_stats(stats, field_count, start.elapsed())
    );
}
