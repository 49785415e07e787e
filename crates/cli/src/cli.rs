//! CLI definitions and command dispatch.

use anyhow::Result;
use clap::{Parser, Subcommand};
use font_mutator::{DuplicatePolicy, Location};
use matrix_core::{GridSize, Spot};

use crate::{
    args::{MasterArg, SampleArg, parse_location, parse_master, parse_sample},
    commands::{evaluate, reallocate_grid, render_weights, select},
};

#[derive(Parser)]
#[command(name = "interpolation-matrix")]
#[command(about = "Explore interpolation and extrapolation between masters on a grid")]
pub struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the weights of every grid cell given the master cells
    Reallocate {
        /// Grid size as COLUMNSxROWS
        #[arg(short, long, default_value = "3x1")]
        grid: GridSize,
        /// Master cell and weights, e.g. `A1=100/100`
        #[arg(short, long = "master", value_parser = parse_master)]
        masters: Vec<MasterArg>,
    },
    /// Evaluate a scalar model built from samples
    Evaluate {
        /// Sample as `axis=value,...:VALUE`, e.g. `wght=0:100`
        #[arg(short, long = "sample", required = true, value_parser = parse_sample)]
        samples: Vec<SampleArg>,
        /// Location to evaluate, e.g. `wght=50`
        #[arg(short, long, required = true, value_parser = parse_location)]
        at: Vec<Location>,
        /// Fail on samples sharing a location instead of keeping the first
        #[arg(long)]
        reject_duplicates: bool,
    },
    /// Resolve a spot list such as `A1, C` or `*` to grid cells
    Select {
        #[arg(short, long, default_value = "3x1")]
        grid: GridSize,
        /// Master cells, never selected
        #[arg(short, long = "master", value_delimiter = ',')]
        masters: Vec<Spot>,
        spots: String,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Reallocate { grid, masters } => {
                let weights = reallocate_grid(grid, &masters)?;
                print!("{}", render_weights(grid, &weights, &masters));
            }
            Commands::Evaluate { samples, at, reject_duplicates } => {
                let policy = if reject_duplicates {
                    DuplicatePolicy::Reject
                } else {
                    DuplicatePolicy::KeepFirst
                };
                for (location, value) in evaluate(&samples, &at, policy)? {
                    println!("{location} {value}");
                }
            }
            Commands::Select { grid, masters, spots } => {
                let names: Vec<String> =
                    select(grid, &masters, &spots).iter().map(ToString::to_string).collect();
                println!("{}", names.join(", "));
            }
        }
        Ok(())
    }
}
