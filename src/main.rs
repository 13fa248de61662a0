// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Quilt-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Quilt and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::error::Error;
use std::path::{Path, PathBuf};

use quilt::format::SourceFormat;
use quilt::render::Size;
use quilt::{GraphConfig, QuiltGraph};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "quilt=info";
// Headless runs have no container; this only sizes the default viewport.
const HEADLESS_CONTAINER: Size = Size {
    width: 1280.0,
    height: 800.0,
};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <story.json|story.twee> [--config <file.json>] [--create-missing] [--clear-empty] [--evaluate] [--export <out.json>]\n\n--create-missing adds a placeholder passage for every unresolved link target.\n--clear-empty removes placeholder passages nothing links to (after --create-missing).\n--evaluate prints the story report as JSON on stdout.\n--export writes the story in the JSON format; `-` writes to stdout.\n\nLogging goes to stderr and follows RUST_LOG (default {DEFAULT_LOG_FILTER})."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    story: Option<PathBuf>,
    config: Option<PathBuf>,
    create_missing: bool,
    clear_empty: bool,
    evaluate: bool,
    export: Option<PathBuf>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(PathBuf::from(args.next().ok_or(())?));
            }
            "--create-missing" => {
                if options.create_missing {
                    return Err(());
                }
                options.create_missing = true;
            }
            "--clear-empty" => {
                if options.clear_empty {
                    return Err(());
                }
                options.clear_empty = true;
            }
            "--evaluate" => {
                if options.evaluate {
                    return Err(());
                }
                options.evaluate = true;
            }
            "--export" => {
                if options.export.is_some() {
                    return Err(());
                }
                options.export = Some(PathBuf::from(args.next().ok_or(())?));
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.story.is_some() {
                    return Err(());
                }
                options.story = Some(PathBuf::from(arg));
            }
        }
    }

    if options.story.is_none() {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn write_export(graph: &QuiltGraph, target: &Path) -> Result<(), Box<dyn Error>> {
    let artifact = graph.export_artifact()?;
    if target == Path::new("-") {
        println!("{}", artifact.contents());
        return Ok(());
    }
    std::fs::write(target, artifact.contents())?;
    tracing::info!(path = %target.display(), "wrote export");
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "quilt".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();

        let config = match options.config.as_deref() {
            Some(path) => GraphConfig::load(path)?,
            None => GraphConfig::default(),
        };
        let story = options.story.as_deref().ok_or("missing story path")?;
        // Fail on the extension before touching the file system.
        SourceFormat::from_path(story)?;

        let mut graph = QuiltGraph::new(config, HEADLESS_CONTAINER)?;
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(graph.open_path(story))?;

        if options.create_missing {
            graph.create_missing_passages(None)?;
        }
        if options.clear_empty {
            let removed = graph.clear_empty_passages();
            tracing::info!(removed = removed.len(), "cleared empty passages");
        }
        if options.evaluate {
            println!("{}", serde_json::to_string_pretty(&graph.evaluate())?);
        }
        if let Some(target) = options.export.as_deref() {
            write_export(&graph, target)?;
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{parse_options, CliOptions};

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(|arg| (*arg).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn story_path_is_required() {
        assert!(parse_options(std::iter::empty()).is_err());
        assert!(parse_options(args(&["--evaluate"])).is_err());
    }

    #[test]
    fn parses_story_only() {
        let options = parse_options(args(&["heist.json"])).expect("parse options");
        assert_eq!(
            options,
            CliOptions {
                story: Some(PathBuf::from("heist.json")),
                ..CliOptions::default()
            }
        );
    }

    #[test]
    fn parses_all_flags() {
        let options = parse_options(args(&[
            "--config",
            "quilt.json",
            "heist.twee",
            "--create-missing",
            "--clear-empty",
            "--evaluate",
            "--export",
            "out.json",
        ]))
        .expect("parse options");

        assert_eq!(options.story.as_deref(), Some(std::path::Path::new("heist.twee")));
        assert_eq!(options.config.as_deref(), Some(std::path::Path::new("quilt.json")));
        assert!(options.create_missing && options.clear_empty && options.evaluate);
        assert_eq!(options.export.as_deref(), Some(std::path::Path::new("out.json")));
    }

    #[test]
    fn rejects_duplicates_and_unknown_flags() {
        assert!(parse_options(args(&["a.json", "b.json"])).is_err());
        assert!(parse_options(args(&["a.json", "--evaluate", "--evaluate"])).is_err());
        assert!(parse_options(args(&["a.json", "--verbose"])).is_err());
        assert!(parse_options(args(&["a.json", "--export"])).is_err());
    }
}
