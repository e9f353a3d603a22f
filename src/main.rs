use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use pitchgrade::{validate_input, AnalysisCache, AnalysisReport, Config, PitchAnalyzer, ScoringPolicy};

#[derive(Parser, Debug)]
#[command(name = "pitchgrade")]
#[command(version = "0.1.0")]
#[command(about = "Score pitch deck text and suggest improvements")]
struct Args {
    /// Plain-text pitch files to analyze (reads stdin when omitted)
    files: Vec<PathBuf>,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Aggregation policy for the overall score
    #[arg(short, long, value_enum, default_value_t = Policy::Structural)]
    policy: Policy,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Rubric JSON overriding the built-in one
    #[arg(long)]
    rubric: Option<PathBuf>,

    /// Directory with stopwords.txt, lemmas.tsv and sentiment.tsv
    #[arg(long)]
    lexicon_dir: Option<PathBuf>,

    /// Analyze texts shorter than the minimum length
    #[arg(long)]
    allow_short: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Basic,
    Structural,
}

impl From<Policy> for ScoringPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Basic => ScoringPolicy::Basic,
            Policy::Structural => ScoringPolicy::Structural,
        }
    }
}

#[derive(Serialize)]
struct SourceReport {
    source: String,
    analyzed_at: DateTime<Utc>,
    report: AnalysisReport,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so reports can be piped
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pitchgrade=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(ref rubric) = args.rubric {
        config.rubric_path = Some(rubric.clone());
    }
    if let Some(ref dir) = args.lexicon_dir {
        config.lexicon_dir = Some(dir.clone());
    }

    let analyzer = PitchAnalyzer::from_config(&config)?;
    let mut cache = AnalysisCache::new(analyzer, config.cache_capacity);
    let policy = ScoringPolicy::from(args.policy);

    let inputs = read_inputs(&args.files)?;

    let pb = if inputs.len() > 1 {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pitches")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut reports = Vec::with_capacity(inputs.len());
    for (source, text) in inputs {
        if !args.allow_short {
            validate_input(&text, config.min_text_length, config.max_text_length)
                .with_context(|| format!("Cannot analyze {}", source))?;
        }

        let report = cache.analyze(&text, policy);
        reports.push(SourceReport {
            source,
            analyzed_at: Utc::now(),
            report,
        });

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Analysis complete");
    }

    let (hits, misses) = cache.stats();
    tracing::debug!("Report cache: {} hits, {} misses", hits, misses);

    output_reports(&reports, &args)
}

fn read_inputs(files: &[PathBuf]) -> anyhow::Result<Vec<(String, String)>> {
    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(vec![("stdin".to_string(), text)]);
    }

    files
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}

fn output_reports(reports: &[SourceReport], args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => match reports {
            [single] => serde_json::to_string_pretty(single)?,
            _ => serde_json::to_string_pretty(reports)?,
        },
        "markdown" => reports.iter().map(format_markdown).collect::<Vec<_>>().join("\n"),
        _ => reports.iter().map(format_text).collect::<Vec<_>>().join("\n"),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(entry: &SourceReport) -> String {
    let report = &entry.report;
    let mut output = String::new();

    output.push_str(&format!("\n=== Pitch Analysis: {} ===\n\n", entry.source));
    output.push_str(&format!(
        "Overall: {} ({}/100, {} policy)\n",
        report.grade, report.overall_score, report.policy
    ));
    output.push_str(&format!("Section Coverage: {}/10\n", report.section_score));
    output.push_str(&format!("Readability: {:.1}\n", report.readability));
    output.push_str(&format!(
        "Sentiment: {:.3} (pos {:.2}, neu {:.2}, neg {:.2})\n\n",
        report.sentiment.compound, report.sentiment.pos, report.sentiment.neu, report.sentiment.neg
    ));

    output.push_str("Structure:\n");
    output.push_str(&format!("  Clarity: {:.0}\n", report.structure.clarity));
    output.push_str(&format!("  Flow: {:.0}\n", report.structure.flow));
    output.push_str(&format!("  Completeness: {:.0}\n", report.structure.completeness));
    output.push_str(&format!("  Engagement: {:.0}\n", report.structure.engagement));

    if !report.strengths.is_empty() {
        output.push_str("\nSections Covered:\n");
        for strength in &report.strengths {
            output.push_str(&format!("  + {}\n", strength));
        }
    }

    if !report.weaknesses.is_empty() {
        output.push_str("\nMissing Sections:\n");
        for (weakness, tip) in report.weaknesses.iter().zip(&report.tips) {
            output.push_str(&format!("  - {}: {}\n", weakness, tip));
        }
    }

    if report.financial_metrics.any_found() {
        output.push_str("\nFinancial Metrics:\n");
        for (category, snippets) in report.financial_metrics.iter() {
            if !snippets.is_empty() {
                output.push_str(&format!("  {}: {}\n", category, snippets.join("; ")));
            }
        }
    }

    if !report.keywords.is_empty() {
        output.push_str(&format!("\nKeywords: {}\n", report.keywords.join(", ")));
    }

    let market = &report.market_opportunity;
    if market.size_mentioned {
        output.push_str(&format!(
            "\nMarket: {}{}\n",
            market.market_size_value.as_deref().unwrap_or("size mentioned"),
            if market.tam_sam_som { " (TAM/SAM/SOM)" } else { "" }
        ));
    }

    if !report.competitive_advantages.is_empty() {
        output.push_str("\nCompetitive Advantages:\n");
        for advantage in &report.competitive_advantages {
            output.push_str(&format!("  * {}\n", advantage));
        }
    }

    if !report.recommendations.is_empty() {
        output.push_str("\nRecommendations:\n");
        for (i, rec) in report.recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, rec));
        }
    }

    output.push_str(&format!(
        "\nAnalyzed on: {}\n",
        entry.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_markdown(entry: &SourceReport) -> String {
    let report = &entry.report;
    let mut output = String::new();

    output.push_str(&format!("# Pitch Analysis: {}\n\n", entry.source));
    output.push_str(&format!(
        "**Grade:** {} ({}/100, {} policy)\n\n",
        report.grade, report.overall_score, report.policy
    ));

    output.push_str("## Scores\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Section Coverage | {}/10 |\n", report.section_score));
    output.push_str(&format!("| Readability | {:.1} |\n", report.readability));
    output.push_str(&format!("| Sentiment | {:.3} |\n", report.sentiment.compound));
    output.push_str(&format!("| Clarity | {:.0} |\n", report.structure.clarity));
    output.push_str(&format!("| Flow | {:.0} |\n", report.structure.flow));
    output.push_str(&format!("| Completeness | {:.0} |\n", report.structure.completeness));
    output.push_str(&format!("| Engagement | {:.0} |\n", report.structure.engagement));

    output.push_str("\n## Sections\n\n");
    output.push_str("| Section | Present |\n|---------|---------|\n");
    for flag in report.section_scores.iter() {
        output.push_str(&format!(
            "| {} | {} |\n",
            flag.name,
            if flag.present == 1 { "yes" } else { "no" }
        ));
    }

    if !report.tips.is_empty() {
        output.push_str("\n## Tips\n\n");
        for tip in &report.tips {
            output.push_str(&format!("- {}\n", tip));
        }
    }

    if report.financial_metrics.any_found() {
        output.push_str("\n## Financial Metrics\n\n");
        for (category, snippets) in report.financial_metrics.iter() {
            if !snippets.is_empty() {
                output.push_str(&format!("- **{}**: {}\n", category, snippets.join("; ")));
            }
        }
    }

    if !report.keywords.is_empty() {
        output.push_str(&format!("\n## Keywords\n\n{}\n", report.keywords.join(", ")));
    }

    if !report.competitive_advantages.is_empty() {
        output.push_str("\n## Competitive Advantages\n\n");
        for advantage in &report.competitive_advantages {
            output.push_str(&format!("- {}\n", advantage));
        }
    }

    if !report.recommendations.is_empty() {
        output.push_str("\n## Recommendations\n\n");
        for rec in &report.recommendations {
            output.push_str(&format!("- {}\n", rec));
        }
    }

    output.push_str(&format!(
        "\n---\n*Analyzed on {}*\n",
        entry.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
