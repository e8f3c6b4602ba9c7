use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use serde::{Deserialize, Serialize};

use lattice_enumerate::config::{
    DEFAULT_DIRS, DEFAULT_LOG_FILTER, DEFAULT_MIN_VOLUME, VERBOSE_LOG_FILTER,
};
use lattice_enumerate::configuration::{Configuration, ConfigurationData};
use lattice_enumerate::enumerate::SuperConfigEnum;
use lattice_enumerate::lattice::{Prim, SupercellEnumParams, SupercellSet};
use lattice_enumerate::local_configuration::{
    make_canonical_local_configuration, CanonicalOptions, LocalConfigurationList,
    LocalConfigurationListData,
};

#[derive(Parser)]
#[command(name = "lattice-enumerate")]
#[command(about = "Canonical local configurations and super configuration enumeration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate the distinct super configurations of a motif
    SuperConfigs {
        /// Input JSON file: {"prim": ..., "motif": ...}
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum supercell volume, in units of the prim
        #[arg(long, default_value_t = DEFAULT_MIN_VOLUME)]
        min: usize,

        /// Maximum supercell volume, in units of the prim
        #[arg(long)]
        max: usize,

        /// Lattice vectors to enumerate over
        #[arg(long, default_value = DEFAULT_DIRS)]
        dirs: String,

        /// Only diagonal transformation matrices
        #[arg(long)]
        diagonal_only: bool,

        /// Only scalar multiples of the unit cell
        #[arg(long)]
        fixed_shape: bool,
    },
    /// Canonicalize a list of local configurations
    Canonicalize {
        /// Input JSON file: {"prim": ..., "local_configurations": ...}
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep the event position, only vary the configuration
        #[arg(long)]
        event_invariant: bool,

        /// Also move each local configuration into the canonical equivalent supercell
        #[arg(long, conflicts_with = "event_invariant")]
        in_canonical_supercell: bool,

        /// Do not write the event occupation on the event sites
        #[arg(long)]
        no_event_occupation: bool,
    },
}

#[derive(Deserialize)]
struct SuperConfigsInput {
    prim: Prim,
    motif: ConfigurationData,
}

#[derive(Deserialize)]
struct CanonicalizeInput {
    prim: Prim,
    local_configurations: LocalConfigurationListData,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    info!("Starting lattice-enumerate v{}", lattice_enumerate::VERSION);

    match cli.command {
        Commands::SuperConfigs {
            input,
            output,
            min,
            max,
            dirs,
            diagonal_only,
            fixed_shape,
        } => {
            info!("Enumerating super configurations from {}", input.display());
            let params = SupercellEnumParams::new(max)
                .with_min(min)
                .with_dirs(&dirs)
                .with_diagonal_only(diagonal_only)
                .with_fixed_shape(fixed_shape);
            super_configs(input, output, params)
        }
        Commands::Canonicalize {
            input,
            output,
            event_invariant,
            in_canonical_supercell,
            no_event_occupation,
        } => {
            info!("Canonicalizing local configurations from {}", input.display());
            let options = CanonicalOptions {
                in_canonical_pos: !event_invariant,
                in_canonical_supercell,
                apply_event_occupation: !no_event_occupation,
            };
            canonicalize(input, output, options)
        }
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &PathBuf) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json<T: Serialize>(value: &T, output: Option<PathBuf>) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => fs::write(&path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", text),
    }
    Ok(())
}

fn super_configs(
    input: PathBuf,
    output: Option<PathBuf>,
    params: SupercellEnumParams,
) -> Result<()> {
    let SuperConfigsInput { prim, motif } = read_json(&input)?;
    let prim = Arc::new(prim);
    let supercell_set = Arc::new(SupercellSet::new(prim.clone()));
    let motif = Configuration::from_data(&motif, &supercell_set).context("Invalid motif")?;

    let enumerator = SuperConfigEnum::new(prim, Some(supercell_set.clone()))?;
    let super_configs = enumerator
        .by_supercell(&motif, &params)?
        .map(|config| config.map(|c| c.to_data()))
        .collect::<lattice_enumerate::Result<Vec<_>>>()?;

    info!(
        "Found {} super configurations ({} supercells constructed)",
        super_configs.len(),
        supercell_set.len()
    );
    write_json(&super_configs, output)
}

fn canonicalize(input: PathBuf, output: Option<PathBuf>, options: CanonicalOptions) -> Result<()> {
    let CanonicalizeInput {
        prim,
        local_configurations,
    } = read_json(&input)?;
    let prim = Arc::new(prim);
    let supercell_set = SupercellSet::new(prim.clone());
    let list = LocalConfigurationList::from_data(&local_configurations, &prim, &supercell_set)
        .context("Invalid local configurations")?;

    let mut canonical = LocalConfigurationList::new(list.event_info().clone(), Vec::new())?;
    for local_configuration in &list {
        canonical.append(make_canonical_local_configuration(
            local_configuration,
            &options,
            Some(&supercell_set),
        )?)?;
    }

    info!("Canonicalized {} local configurations", canonical.len());
    write_json(&canonical.to_data(), output)
}
