use std::path::PathBuf;

use clap::Parser;

/// Generator for ha-floorplan.
///
/// Fetches the entity states from a Home Assistant server, adds a visual
/// element to the SVG for every entity matched by the rule file, and writes
/// the merged ha-floorplan rules for the renderer. The SVG file is backed up
/// before processing.
#[derive(Parser, Debug)]
#[command(name = "floorgen", version, about)]
pub struct Args {
    /// The SVG floorplan file to process (only the first is used)
    #[arg(short, long, required = true, num_args = 1..)]
    pub svg: Vec<PathBuf>,

    /// The ha-floorplan rules file to base from (only the first is used)
    #[arg(short, long, required = true, num_args = 1..)]
    pub rules: Vec<PathBuf>,

    /// The url to the Home Assistant server
    #[arg(short, long)]
    pub url: String,

    /// Long lived token for the Home Assistant server
    #[arg(short, long)]
    pub token: String,

    /// Where to write the merged ha-floorplan rules
    #[arg(short, long, default_value = "ha_rules.yml")]
    pub output: PathBuf,
}
