use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gstree::fasta::{self, FastaRecord};
use gstree::{SuffixTree, TreeConfig};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gstree")]
#[command(about = "Substring search across FASTA sequences with a generalized suffix tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Input {
    /// FASTA files to index, in order
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Tree configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a pattern occurs in any sequence
    Contains {
        pattern: String,

        #[command(flatten)]
        input: Input,
    },
    /// List every occurrence of a pattern
    Find {
        pattern: String,

        /// Report offsets starting at 1
        #[arg(long)]
        one_based: bool,

        #[command(flatten)]
        input: Input,
    },
    /// Print the longest substring shared by all sequences
    Lcs {
        #[command(flatten)]
        input: Input,
    },
    /// Show tree statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        input: Input,
    },
    /// Write the tree in Graphviz DOT format
    Dot {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        input: Input,
    },
}

fn main() -> Result<()> {
    let log_level = std::env::var("GSTREE_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_level))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Contains { pattern, input } => {
            let (tree, _) = load(&input)?;
            println!("{}", tree.contains(&pattern));
        }
        Commands::Find {
            pattern,
            one_based,
            input,
        } => {
            let (tree, records) = load(&input)?;
            let base = usize::from(one_based);
            for hit in tree.find_all(&pattern) {
                let name = &records[hit.doc_id as usize].name;
                println!("{}\t{}\t{}", hit.doc_id, hit.offset + base, name);
            }
        }
        Commands::Lcs { input } => {
            let (tree, _) = load(&input)?;
            println!("{}", tree.longest_common_substring());
        }
        Commands::Stats { json, input } => {
            let (tree, _) = load(&input)?;
            show_stats(&tree, json)?;
        }
        Commands::Dot { output, input } => {
            let (tree, _) = load(&input)?;
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Failed to create {}", path.display()))?;
                    let mut w = BufWriter::new(file);
                    tree.write_dot(&mut w)?;
                    w.flush()?;
                }
                None => {
                    let stdout = std::io::stdout();
                    let mut w = stdout.lock();
                    tree.write_dot(&mut w)?;
                }
            }
        }
    }

    Ok(())
}

/// Read the configuration and every input file, then build the tree
fn load(input: &Input) -> Result<(SuffixTree, Vec<FastaRecord>)> {
    let config = match &input.config {
        Some(path) => TreeConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TreeConfig::default(),
    };

    let mut records = Vec::new();
    for path in &input.files {
        records.extend(read_records(path)?);
    }

    let mut tree = SuffixTree::with_config(config);
    fasta::index_records(&mut tree, &records).context("Failed to index sequences")?;

    tracing::info!(
        files = input.files.len(),
        sequences = records.len(),
        "built suffix tree"
    );
    Ok((tree, records))
}

fn read_records(path: &Path) -> Result<Vec<FastaRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    // Mapping an empty file fails on some platforms
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }

    let mmap = unsafe { Mmap::map(&file)? };
    let records = fasta::parse_bytes(&mmap)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(records)
}

fn show_stats(tree: &SuffixTree, json: bool) -> Result<()> {
    let stats = tree.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Tree Statistics");
    println!("===============");
    println!();
    println!("Documents:        {}", stats.documents);
    println!("Characters:       {}", stats.characters);
    println!("Nodes:            {}", stats.nodes);
    println!("Internal nodes:   {}", stats.internal_nodes);
    println!("Leaves:           {}", stats.leaves);
    println!("Suffix links:     {}", stats.suffix_links);

    Ok(())
}
