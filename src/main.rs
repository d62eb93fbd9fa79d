//! tweetnorm CLI - Tweet Normalization Pipeline
//!
//! Command-line interface for cleaning tweet collections, one text per line.

use clap::{Args, Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::{error, info};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tweetnorm::{process_tweets, Config, Lexicon, MaskMode, Normalizer, Result};

/// Texts processed per progress bar update.
const CHUNK_SIZE: usize = 1024;

#[derive(Parser)]
#[command(name = "tweetnorm")]
#[command(author = "tweetnorm Contributors")]
#[command(version)]
#[command(about = "Tweet normalization pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize tweets, one per line
    Clean {
        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Run the batch pre-cleaner before the pipeline
        #[arg(long)]
        preclean: bool,
    },

    /// Run only the batch pre-cleaner, one text per line
    Preclean {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Print the effective configuration as JSON
    ShowConfig {
        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input file, one text per line (stdin when absent or "-")
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file (stdout when absent or "-")
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct PipelineArgs {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Term frequency dictionary for segmentation and spelling correction
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Detect raw @handles and http links instead of @USER / URL markers
    #[arg(long)]
    trial: bool,

    /// Delete mentions and links instead of replacing them with placeholders
    #[arg(long)]
    remove_markers: bool,

    /// Keep hashtags
    #[arg(long)]
    no_hashtags: bool,

    /// Keep punctuation
    #[arg(long)]
    no_punctuation: bool,

    /// Skip contraction expansion
    #[arg(long)]
    no_contractions: bool,

    /// Skip verb lemmatization
    #[arg(long)]
    no_lemmatize: bool,

    /// Keep stopwords
    #[arg(long)]
    no_stopwords: bool,

    /// Skip lengthening reduction
    #[arg(long)]
    no_lengthening: bool,

    /// Skip compound segmentation
    #[arg(long)]
    no_segmentation: bool,

    /// Skip spelling correction
    #[arg(long)]
    no_spelling: bool,
}

impl PipelineArgs {
    /// Loads the configuration file, if any, and applies command-line overrides.
    fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(dictionary) = &self.dictionary {
            config.lexicon.dictionary_path = Some(dictionary.clone());
        }

        let pipeline = &mut config.pipeline;
        if self.trial {
            pipeline.mask_mode = MaskMode::Trial;
        }
        if self.remove_markers {
            pipeline.remove_user_url = true;
        }
        disable_if(&mut pipeline.remove_hashtags, self.no_hashtags);
        disable_if(&mut pipeline.remove_punctuation, self.no_punctuation);
        disable_if(&mut pipeline.expand_contractions, self.no_contractions);
        disable_if(&mut pipeline.lemmatize, self.no_lemmatize);
        disable_if(&mut pipeline.remove_stopwords, self.no_stopwords);
        disable_if(&mut pipeline.reduce_lengthenings, self.no_lengthening);
        disable_if(&mut pipeline.segment_words, self.no_segmentation);
        disable_if(&mut pipeline.correct_spelling, self.no_spelling);

        Ok(config)
    }
}

fn disable_if(stage: &mut bool, flag: bool) {
    if flag {
        *stage = false;
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Clean {
            io,
            pipeline,
            preclean,
        } => clean(&io, &pipeline, preclean),

        Commands::Preclean { io } => preclean_only(&io),

        Commands::ShowConfig { pipeline } => show_config(&pipeline),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn clean(io: &IoArgs, args: &PipelineArgs, preclean: bool) -> Result<()> {
    let start_time = Instant::now();
    let config = args.resolve()?;

    // Resource errors surface here, before any text is touched.
    let lexicon = Lexicon::load(&config.lexicon)?;
    let normalizer = Normalizer::new(config.pipeline, &lexicon);

    let mut texts = read_lines(io.input.as_deref())?;
    info!("Read {} texts", format_number(texts.len()));

    if preclean {
        texts = process_tweets(&texts);
    }

    let pb = ProgressBar::new(texts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
            .unwrap()
            .progress_chars("█▓▒░  "),
    );
    pb.set_message("Normalizing tweets...");

    let mut cleaned = Vec::with_capacity(texts.len());
    for chunk in texts.chunks(CHUNK_SIZE) {
        cleaned.extend(chunk.par_iter().map(|text| normalizer.normalize(text)).collect::<Vec<_>>());
        pb.inc(chunk.len() as u64);
    }
    pb.finish_and_clear();

    write_lines(io.output.as_deref(), &cleaned)?;
    info!(
        "Normalized {} texts in {}",
        format_number(cleaned.len()),
        HumanDuration(start_time.elapsed())
    );

    Ok(())
}

fn preclean_only(io: &IoArgs) -> Result<()> {
    let texts = read_lines(io.input.as_deref())?;
    let cleaned = process_tweets(&texts);
    write_lines(io.output.as_deref(), &cleaned)?;
    info!("Pre-cleaned {} texts", format_number(cleaned.len()));
    Ok(())
}

fn show_config(args: &PipelineArgs) -> Result<()> {
    let config = args.resolve()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn is_stdio(path: &Path) -> bool {
    path == Path::new("-")
}

fn read_lines(path: Option<&Path>) -> Result<Vec<String>> {
    let reader: Box<dyn BufRead> = match path {
        Some(p) if !is_stdio(p) => Box::new(BufReader::new(File::open(p)?)),
        _ => Box::new(BufReader::new(io::stdin())),
    };

    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok(lines)
}

fn write_lines(path: Option<&Path>, lines: &[String]) -> Result<()> {
    let writer: Box<dyn Write> = match path {
        Some(p) if !is_stdio(p) => Box::new(File::create(p)?),
        _ => Box::new(io::stdout().lock()),
    };

    let mut writer = BufWriter::new(writer);
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
