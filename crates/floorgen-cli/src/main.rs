//! floorgen
//!
//! Synchronizes a floor-plan SVG with the entities of a Home Assistant
//! server: backs up the SVG, fetches the entity snapshot, runs the merge,
//! writes the mutated SVG back, and dumps the merged ha-floorplan rules.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

use floorgen_api::StatesClient;
use floorgen_core::{Diagnostics, EntityIndex};
use floorgen_merge::merge;
use floorgen_rules::load_rules;
use floorgen_svg::Document;

mod args;

use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let svg_path = &args.svg[0];
    if args.svg.len() > 1 {
        warn!("multiple SVG files given, using {:?}", svg_path);
    }
    let rules_path = &args.rules[0];
    if args.rules.len() > 1 {
        warn!("multiple rule files given, using {:?}", rules_path);
    }
    info!("using {:?} as SVG reference", svg_path);

    // Everything that can fail structurally happens before the merge: the
    // client is validated, the SVG and rule file are parsed, and the
    // snapshot is fully materialized. Only then does mutation begin.
    let client = StatesClient::new(&args.url, &args.token)?;

    let backup_path = backup(svg_path).context("failed to back up SVG file")?;
    info!("backed up SVG to {:?}", backup_path);

    let xml = fs::read_to_string(svg_path)
        .with_context(|| format!("failed to read SVG file {svg_path:?}"))?;
    let mut doc = Document::parse(&xml)?;

    let mut load_diagnostics = Diagnostics::new();
    let rules = load_rules(rules_path, &mut load_diagnostics)?;

    let entities = client.states().await?;
    let index = EntityIndex::new(entities);

    let outcome = merge(&index, &rules, &mut doc);

    fs::write(svg_path, doc.to_xml()?)
        .with_context(|| format!("failed to write SVG file {svg_path:?}"))?;
    fs::write(&args.output, outcome.rules.to_yaml()?)
        .with_context(|| format!("failed to write rule output {:?}", args.output))?;

    let problems = load_diagnostics
        .entries()
        .iter()
        .chain(outcome.diagnostics.iter())
        .filter(|d| d.severity != floorgen_core::Severity::Info)
        .count();
    if problems > 0 {
        warn!("finished with {problems} warnings/errors, see the log above");
    }
    info!(
        "wrote {} rules to {:?}",
        outcome.rules.len(),
        args.output
    );

    Ok(())
}

/// Copy the SVG to `<name>.<suffix>.bak` before any mutation
fn backup(path: &Path) -> std::io::Result<PathBuf> {
    let suffix = Uuid::new_v4().simple().to_string();
    let backup_path = PathBuf::from(format!("{}.{}.bak", path.display(), &suffix[..6]));
    fs::copy(path, &backup_path)?;
    Ok(backup_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn backup_copies_next_to_the_original() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("plan.svg");
        let mut file = fs::File::create(&svg).unwrap();
        file.write_all(b"<svg/>").unwrap();

        let backup_path = backup(&svg).unwrap();
        assert!(backup_path.exists());
        assert_eq!(fs::read(&backup_path).unwrap(), b"<svg/>");
        let name = backup_path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("plan.svg."));
        assert!(name.ends_with(".bak"));
    }

    #[test]
    fn backup_of_missing_file_fails() {
        assert!(backup(Path::new("/nonexistent/plan.svg")).is_err());
    }
}
