//! Recommend command implementation for the Wayfarer CLI.
//!
//! Runs the interactive matching session: shows candidates round by round,
//! records the user's picks, and prints the final ranking with a confidence
//! estimate, learned-preference insights, and nearest neighbours of the
//! winner. The finished session can be exported as JSON for later analysis.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfarer_core::{
    BudgetQuery, Catalog, CatalogError, Destination, PreferenceVector, ResolvedStyle, RoundState,
    SqliteCatalog, StyleRegistry,
};
use wayfarer_match::{
    estimate, find_similar, preference_insights, rank, BlendWeight, RoundSelector,
};

use crate::CliError;

pub(crate) const ARG_CATALOG: &str = "catalog";
pub(crate) const ENV_CATALOG: &str = "WAYFARER_CMDS_RECOMMEND_CATALOG";

const DEFAULT_BUDGET: f32 = 3000.0;
const DEFAULT_DAYS: u32 = 7;
const DEFAULT_TRAVELERS: u32 = 1;
const DEFAULT_STYLE: &str = "balanced";
const DEFAULT_TOP: usize = 10;
const SIMILAR_COUNT: usize = 3;

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Run an interactive matching session against a destination \
                 catalogue. Options can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Recommend destinations through an interactive session"
)]
#[ortho_config(prefix = "WAYFARER")]
pub(crate) struct RecommendArgs {
    /// Path to the destination catalogue (SQLite database, or JSON when the
    /// file ends in `.json`).
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<PathBuf>,
    /// Total trip budget for the whole party.
    #[arg(long, value_name = "amount")]
    #[serde(default)]
    pub(crate) budget: Option<f32>,
    /// Trip length in days.
    #[arg(long, value_name = "days")]
    #[serde(default)]
    pub(crate) days: Option<u32>,
    /// Party size.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) travelers: Option<u32>,
    /// Travel style preset; unknown names fall back to balanced weights.
    #[arg(long, value_name = "style")]
    #[serde(default)]
    pub(crate) style: Option<String>,
    /// Seed for round selection; omit for a fresh session each run.
    #[arg(long, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Weight of the secondary score when blending, in 0..=1.
    #[arg(long, value_name = "weight")]
    #[serde(default)]
    pub(crate) blend_weight: Option<f32>,
    /// Rank on match score alone, ignoring secondary scores.
    #[arg(long)]
    #[serde(default)]
    pub(crate) no_secondary: bool,
    /// How many recommendations to print.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) top: Option<usize>,
    /// Write the finished session as JSON to this path.
    #[arg(long, value_name = "path")]
    #[serde(default)]
    pub(crate) export: Option<PathBuf>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) catalog: PathBuf,
    pub(crate) budget: f32,
    pub(crate) days: u32,
    pub(crate) travelers: u32,
    pub(crate) style: String,
    pub(crate) seed: Option<u64>,
    pub(crate) blend_weight: BlendWeight,
    pub(crate) use_secondary: bool,
    pub(crate) top: usize,
    pub(crate) export: Option<PathBuf>,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        if self.catalog.is_file() {
            Ok(())
        } else {
            Err(CliError::MissingSourceFile {
                field: ARG_CATALOG,
                path: self.catalog.clone(),
            })
        }
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_CATALOG,
        })?;
        let blend_weight = args
            .blend_weight
            .map_or_else(|| Ok(BlendWeight::default()), BlendWeight::new)?;
        Ok(Self {
            catalog,
            budget: args.budget.unwrap_or(DEFAULT_BUDGET),
            days: args.days.unwrap_or(DEFAULT_DAYS),
            travelers: args.travelers.unwrap_or(DEFAULT_TRAVELERS),
            style: args.style.unwrap_or_else(|| DEFAULT_STYLE.to_owned()),
            seed: args.seed,
            blend_weight,
            use_secondary: !args.no_secondary,
            top: args.top.unwrap_or(DEFAULT_TOP),
            export: args.export,
        })
    }
}

/// Run the `recommend` command against stdin and stdout.
pub(crate) fn run(args: RecommendArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let pool = load_candidates(&config)?;
    if pool.is_empty() {
        return Err(CliError::EmptyCatalog {
            budget: config.budget,
            days: config.days,
        });
    }

    let resolved = StyleRegistry::resolve(&config.style);
    if resolved.fell_back {
        log::warn!(
            "unknown style {:?}; falling back to balanced weights",
            config.style
        );
    }
    let seed = config.seed.unwrap_or_else(rand::random);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let export = run_session(
        &config,
        seed,
        &resolved,
        &pool,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;

    if let Some(path) = &config.export {
        write_export(path, &export)?;
    }
    Ok(())
}

/// Load budget-admissible destinations from the configured catalogue.
pub(crate) fn load_candidates(config: &RecommendConfig) -> Result<Vec<Destination>, CliError> {
    let query = BudgetQuery::new(config.budget, config.days).with_travelers(config.travelers);
    if is_json(&config.catalog) {
        let catalog = JsonCatalog::open(&config.catalog)?;
        Ok(catalog.candidates(&query)?)
    } else {
        let catalog = SqliteCatalog::open(&config.catalog)?;
        Ok(catalog.candidates(&query)?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Catalogue backed by a JSON array of destinations.
#[derive(Debug, Clone)]
struct JsonCatalog {
    destinations: Vec<Destination>,
}

impl JsonCatalog {
    fn open(path: &Path) -> Result<Self, CliError> {
        let file = File::open(path).map_err(|source| CliError::OpenCatalog {
            path: path.to_path_buf(),
            source,
        })?;
        let destinations =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                CliError::ParseCatalog {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        Ok(Self { destinations })
    }
}

impl Catalog for JsonCatalog {
    fn all(&self) -> Result<Vec<Destination>, CatalogError> {
        Ok(self.destinations.clone())
    }
}

/// Serializable record of a finished session.
#[derive(Debug, Serialize)]
pub(crate) struct SessionExport {
    pub(crate) seed: u64,
    pub(crate) style: String,
    pub(crate) rounds_played: u32,
    pub(crate) chosen_ids: Vec<u64>,
    pub(crate) shown_ids: Vec<u64>,
    pub(crate) preference: PreferenceVector,
    pub(crate) recommendations: Vec<Recommendation>,
    pub(crate) confidence: f32,
    pub(crate) confidence_label: String,
}

/// One exported recommendation row.
#[derive(Debug, Serialize)]
pub(crate) struct Recommendation {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) country: String,
    pub(crate) match_score: f32,
    pub(crate) secondary_score: f32,
    pub(crate) combined_score: f32,
}

/// Drive the round loop and print the final report.
///
/// Split out from [`run`] so tests can script the interaction with in-memory
/// readers and writers.
pub(crate) fn run_session<R: BufRead, W: Write>(
    config: &RecommendConfig,
    seed: u64,
    resolved: &ResolvedStyle,
    pool: &[Destination],
    input: &mut R,
    out: &mut W,
) -> Result<SessionExport, CliError> {
    let selector = RoundSelector::new(seed);
    let mut state = RoundState::new();

    while !selector.is_complete(&state) {
        let shown = selector.select(
            pool,
            &state,
            &resolved.profile,
            config.use_secondary,
            config.blend_weight,
        );
        if shown.is_empty() {
            writeln!(out, "\nCatalogue exhausted; moving to results.")
                .map_err(CliError::WriteOutput)?;
            break;
        }
        present_round(out, &state, &shown)?;
        let Some(index) = read_pick(input, out, shown.len())? else {
            break;
        };
        let pick = shown.get(index).ok_or_else(|| {
            // read_pick bounds the index; this is unreachable in practice.
            CliError::ReadSelection(std::io::Error::other("selection out of range"))
        })?;
        state = state.record_choice(pick.id, &shown)?;
    }

    let ranked = rank(
        pool,
        state.chosen(),
        &resolved.profile,
        config.use_secondary,
        config.blend_weight,
    );
    let report = estimate(&ranked);
    let insights = preference_insights(state.chosen());

    writeln!(out, "\nTop recommendations:").map_err(CliError::WriteOutput)?;
    for (position, scored) in ranked.iter().take(config.top).enumerate() {
        writeln!(
            out,
            "{:>2}. {} ({}) - {:.1} (match {:.1}, secondary {:.1})",
            position + 1,
            scored.destination.name,
            scored.destination.country,
            scored.combined_score,
            scored.match_score,
            scored.secondary_score,
        )
        .map_err(CliError::WriteOutput)?;
    }
    writeln!(
        out,
        "\nConfidence: {} ({:.0}%, lead {:.1})",
        report.label.as_str(),
        report.confidence,
        report.gap_to_second,
    )
    .map_err(CliError::WriteOutput)?;
    for pattern in &insights.patterns {
        writeln!(out, "  - {pattern}").map_err(CliError::WriteOutput)?;
    }

    if let Some(winner) = ranked.first() {
        let neighbours = find_similar(&winner.destination, pool, SIMILAR_COUNT);
        if !neighbours.is_empty() {
            writeln!(out, "\nSimilar to {}:", winner.destination.name)
                .map_err(CliError::WriteOutput)?;
            for similar in &neighbours {
                writeln!(
                    out,
                    "  {} ({}) - {:.1}% similar",
                    similar.destination.name, similar.destination.country, similar.similarity,
                )
                .map_err(CliError::WriteOutput)?;
            }
        }
    }

    Ok(SessionExport {
        seed,
        style: config.style.clone(),
        rounds_played: state.round(),
        chosen_ids: state.chosen().iter().map(|dest| dest.id).collect(),
        shown_ids: state.shown_ids().to_vec(),
        preference: insights.preference,
        recommendations: ranked
            .iter()
            .take(config.top)
            .map(|scored| Recommendation {
                id: scored.destination.id,
                name: scored.destination.name.clone(),
                country: scored.destination.country.clone(),
                match_score: scored.match_score,
                secondary_score: scored.secondary_score,
                combined_score: scored.combined_score,
            })
            .collect(),
        confidence: report.confidence,
        confidence_label: report.label.as_str().to_owned(),
    })
}

fn present_round<W: Write>(
    out: &mut W,
    state: &RoundState,
    shown: &[Destination],
) -> Result<(), CliError> {
    writeln!(out, "\nRound {}:", state.round() + 1).map_err(CliError::WriteOutput)?;
    for (position, dest) in shown.iter().enumerate() {
        let budget = dest
            .daily_budget()
            .map_or_else(|| "?".to_owned(), |daily| format!("{daily:.0}/day"));
        writeln!(
            out,
            "  {}. {} ({}) - {budget}",
            position + 1,
            dest.name,
            dest.country
        )
        .map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

/// Prompt until the user supplies a valid pick.
///
/// Returns `None` when the user ends the session early with `q` or EOF.
fn read_pick<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    count: usize,
) -> Result<Option<usize>, CliError> {
    loop {
        write!(out, "Pick 1-{count} (q to finish): ").map_err(CliError::WriteOutput)?;
        out.flush().map_err(CliError::WriteOutput)?;
        let mut line = String::new();
        let read = input.read_line(&mut line).map_err(CliError::ReadSelection)?;
        if read == 0 {
            return Ok(None);
        }
        match parse_pick(&line, count) {
            Pick::Chosen(index) => return Ok(Some(index)),
            Pick::Quit => return Ok(None),
            Pick::Invalid => {
                writeln!(out, "Enter a number between 1 and {count}.")
                    .map_err(CliError::WriteOutput)?;
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Pick {
    Chosen(usize),
    Quit,
    Invalid,
}

pub(crate) fn parse_pick(line: &str, count: usize) -> Pick {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") {
        return Pick::Quit;
    }
    match trimmed.parse::<usize>() {
        Ok(choice) if (1..=count).contains(&choice) => Pick::Chosen(choice - 1),
        _ => Pick::Invalid,
    }
}

pub(crate) fn write_export(path: &Path, export: &SessionExport) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(export).map_err(CliError::SerializeExport)?;
    std::fs::write(path, payload).map_err(|source| CliError::WriteExport {
        path: path.to_path_buf(),
        source,
    })
}
