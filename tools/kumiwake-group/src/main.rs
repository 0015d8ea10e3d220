//! Kumiwake Group Tool
//!
//! Groups already-scraped torrent listings into releases and prints the
//! ranked groups as JSON lines or a plain table.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use kumiwake_core::{
    LanguageFilter, LanguageTable, Pipeline, PipelineConfig, StaticDetailSource, TorrentGroup,
    TorrentRecord,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, info};

/// Width of the group name column in table output.
const NAME_WIDTH: usize = 40;

/// CLI arguments
#[derive(Parser)]
#[command(name = "kumiwake-group")]
#[command(about = "Group scraped anime torrent listings into consistent releases")]
#[command(version)]
struct Cli {
    /// JSON array of torrent records, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    torrents: String,

    /// JSON object mapping torrent ids to detail records
    #[arg(short, long, env = "KUMIWAKE_DETAILS")]
    details: Option<PathBuf>,

    /// Anime name used when a torrent name yields none
    #[arg(short, long, env = "KUMIWAKE_ANIME_NAME", default_value = "Unknown")]
    anime_name: String,

    /// Audio language preference (name or table index)
    #[arg(long, default_value = "any")]
    audio: String,

    /// Subtitle language preference (name or table index)
    #[arg(long, default_value = "any")]
    subs: String,

    /// Keep only torrents whose names mention a dub
    #[arg(long)]
    dub_only: bool,

    /// Never let the uploader name replace the title's release group
    #[arg(long)]
    no_submitter_override: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Print the member torrents of the N-th group (1-based)
    #[arg(long, value_name = "N")]
    details_for: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
}

/// One output line per group.
#[derive(Debug, Serialize)]
pub struct GroupOutput {
    pub rank: usize,
    pub display_name: String,
    pub description: String,
    pub season: String,
    pub episodes: String,
    pub quality: String,
    pub dubbed: bool,
    pub torrent_count: usize,
    pub total_seeders: u64,
    pub torrents: Vec<MemberOutput>,
}

#[derive(Debug, Serialize)]
pub struct MemberOutput {
    pub id: String,
    pub name: String,
}

impl GroupOutput {
    fn from_group(rank: usize, group: &TorrentGroup) -> Self {
        Self {
            rank,
            display_name: group.display_name().to_string(),
            description: group.description().to_string(),
            season: group.season_short(),
            episodes: group.episode_range_label().to_string(),
            quality: group.dominant_quality().to_string(),
            dubbed: group.is_dubbed(),
            torrent_count: group.len(),
            total_seeders: group.total_seeders(),
            torrents: group
                .torrents()
                .iter()
                .map(|t| MemberOutput {
                    id: t.id.clone(),
                    name: t.name.clone(),
                })
                .collect(),
        }
    }
}

fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn read_torrents(source: &str) -> Result<Vec<TorrentRecord>> {
    let mut json = String::new();
    if source == "-" {
        io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read torrents from stdin")?;
    } else {
        File::open(source)
            .and_then(|mut f| f.read_to_string(&mut json))
            .with_context(|| format!("Failed to read torrents from {source}"))?;
    }
    serde_json::from_str(&json).context("Torrent input is not a JSON array of torrent records")
}

fn load_details(path: Option<&Path>) -> Result<StaticDetailSource> {
    let Some(path) = path else {
        return Ok(StaticDetailSource::new());
    };
    let file =
        File::open(path).with_context(|| format!("Failed to open details {}", path.display()))?;
    StaticDetailSource::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to load details from {}", path.display()))
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() <= NAME_WIDTH {
        return name.to_string();
    }
    let head: String = name.chars().take(NAME_WIDTH - 3).collect();
    format!("{head}...")
}

fn write_json(out: &mut impl Write, groups: &[TorrentGroup]) -> Result<()> {
    for (i, group) in groups.iter().enumerate() {
        let line = serde_json::to_string(&GroupOutput::from_group(i + 1, group))?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn write_table(out: &mut impl Write, groups: &[TorrentGroup]) -> Result<()> {
    writeln!(
        out,
        "{:>3}  {:<w$}  {:<6}  {:<14}  {:<8}  {:<6}  {:>8}  {:>8}",
        "#",
        "Group",
        "Season",
        "Episodes",
        "Quality",
        "Dubbed",
        "Torrents",
        "Seeders",
        w = NAME_WIDTH
    )?;
    for (i, group) in groups.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<w$}  {:<6}  {:<14}  {:<8}  {:<6}  {:>8}  {:>8}",
            i + 1,
            truncate_name(group.display_name()),
            group.season_short(),
            group.episode_range_label(),
            group.dominant_quality(),
            if group.is_dubbed() { "Yes" } else { "No" },
            group.len(),
            group.total_seeders(),
            w = NAME_WIDTH
        )?;
    }
    Ok(())
}

fn write_members(out: &mut impl Write, groups: &[TorrentGroup], n: usize) -> Result<()> {
    let Some(group) = n.checked_sub(1).and_then(|i| groups.get(i)) else {
        bail!("No group {n}; there are {} groups", groups.len());
    };
    writeln!(out, "{group}")?;
    for torrent in group.torrents() {
        writeln!(out, "  {torrent}")?;
        writeln!(out, "    {}", torrent.download_url())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level_for(cli.verbose))
        .init();

    let torrents = read_torrents(&cli.torrents)?;
    let details = load_details(cli.details.as_deref())?;
    info!(torrents = torrents.len(), details = details.len(), "loaded input");

    let config = PipelineConfig::new()
        .with_anime_name(cli.anime_name)
        .with_submitter_override(!cli.no_submitter_override)
        .with_dub_only(cli.dub_only)
        .with_audio_filter(LanguageFilter::from_choice(&cli.audio, LanguageTable::Audio))
        .with_subtitle_filter(LanguageFilter::from_choice(&cli.subs, LanguageTable::Subtitle));
    let pipeline = Pipeline::new(config).context("Failed to create pipeline")?;
    let groups = pipeline.run(torrents, &details);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.details_for {
        Some(n) => write_members(&mut out, &groups, n)?,
        None if cli.format == Format::Table => write_table(&mut out, &groups)?,
        None => write_json(&mut out, &groups)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kumiwake_core::{ExtractedMetadata, group_deterministic};

    fn sample_groups() -> Vec<TorrentGroup> {
        let mut dub = ExtractedMetadata::with_anime_name("Frieren");
        dub.release_group = "SubsPlease".into();
        dub.quality = "1080p".into();
        dub.episode = "Episode 1".into();
        let torrents = vec![
            TorrentRecord::new("7", "Frieren - 01 [Dub]")
                .with_seeders(12)
                .with_metadata(dub),
            TorrentRecord::new("8", "Frieren - 01").with_seeders(3),
        ];
        group_deterministic(&torrents, "Frieren")
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "kumiwake-group",
            "--torrents",
            "in.json",
            "--audio",
            "english",
            "--format",
            "table",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.torrents, "in.json");
        assert_eq!(cli.audio, "english");
        assert_eq!(cli.format, Format::Table);
        assert_eq!(level_for(cli.verbose), Level::DEBUG);
        assert!(!cli.dub_only);
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Short"), "Short");
        let long = "x".repeat(60);
        let cut = truncate_name(&long);
        assert_eq!(cut.chars().count(), NAME_WIDTH);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_json_output() {
        let mut buf = Vec::new();
        write_json(&mut buf, &sample_groups()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["rank"], 1);
        assert_eq!(first["total_seeders"], 12);
        assert_eq!(first["dubbed"], true);
        assert_eq!(first["episodes"], "Episode 1");
        assert_eq!(first["torrents"][0]["id"], "7");
    }

    #[test]
    fn test_table_output() {
        let mut buf = Vec::new();
        write_table(&mut buf, &sample_groups()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Yes"));
        assert!(text.contains("Various"));
    }

    #[test]
    fn test_members_output() {
        let groups = sample_groups();
        let mut buf = Vec::new();
        write_members(&mut buf, &groups, 2).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Frieren - 01 [] S:3 L:0"));
        assert!(text.contains("https://nyaa.si/download/8.torrent"));

        assert!(write_members(&mut Vec::new(), &groups, 0).is_err());
        assert!(write_members(&mut Vec::new(), &groups, 3).is_err());
    }
}
