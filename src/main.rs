//! CLI for firmsoft: identify camera software embedded in firmware files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use firmsoft::{detect, Config, Detection, Detector, StaticSourceProvider};
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[derive(Parser)]
#[command(name = "firmsoft")]
#[command(about = "Identify camera-control software embedded in firmware images", long_about = None)]
struct Args {
    /// Firmware image, memory dump, or directory of them
    path: PathBuf,

    /// TOML file with detector and source definitions
    #[arg(short, long, value_name = "FILE", env = "FIRMSOFT_CONFIG")]
    config: PathBuf,

    /// When scanning a directory, recurse into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Output JSON per file (one line per file unless --pretty)
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON (use with --json)
    #[arg(long)]
    pretty: bool,

    /// Quiet: only print files where software was found
    #[arg(short, long)]
    quiet: bool,
}

struct Scanner {
    detectors: Vec<Detector>,
    sources: StaticSourceProvider,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = Config::load(&args.config)?;
    let scanner = Scanner {
        detectors: config.detectors()?,
        sources: config.source_provider(),
    };
    log::info!(
        "loaded {} detector(s) from {}",
        scanner.detectors.len(),
        args.config.display()
    );

    if args.path.is_file() {
        scan_file(&args.path, &args, &scanner)?;
        return Ok(());
    }
    if args.path.is_dir() {
        scan_dir(&args.path, &args, &scanner)?;
        return Ok(());
    }

    eprintln!("Not a file or directory: {}", args.path.display());
    std::process::exit(1);
}

fn scan_file(path: &Path, args: &Args, scanner: &Scanner) -> Result<bool, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    let found = detect(&bytes, &scanner.detectors, &scanner.sources);
    let hit = found.is_some();
    print_result(&path.display().to_string(), found.as_ref(), args, &bytes)?;
    Ok(hit)
}

fn scan_dir(dir: &Path, args: &Args, scanner: &Scanner) -> Result<(), Box<dyn std::error::Error>> {
    let walker = if args.recursive {
        WalkDir::new(dir).into_iter()
    } else {
        WalkDir::new(dir).max_depth(1).into_iter()
    };

    let mut total = 0u64;
    let mut detected = 0u64;

    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        total += 1;
        match scan_file(path, args, scanner) {
            Ok(true) => detected += 1,
            Ok(false) => {}
            Err(err) => log::warn!("skipping {}: {}", path.display(), err),
        }
    }

    if !args.quiet {
        eprintln!("Scanned {} files, {} with known software", total, detected);
    }
    Ok(())
}

fn print_result(
    path: &str,
    found: Option<&Detection>,
    args: &Args,
    bytes: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    if args.quiet && found.is_none() {
        return Ok(());
    }
    if args.json {
        let mut out = IndexMap::<String, serde_json::Value>::new();
        out.insert("sha256".to_string(), serde_json::Value::String(sha256_hex(bytes)));
        out.insert("path".to_string(), serde_json::Value::String(path.to_string()));
        out.insert("size_bytes".to_string(), serde_json::to_value(bytes.len())?);
        out.insert("offset".to_string(), serde_json::to_value(found.map(|d| d.offset))?);
        out.insert("software".to_string(), serde_json::to_value(found.map(|d| &d.info))?);
        let json_str = if args.pretty {
            serde_json::to_string_pretty(&out)?
        } else {
            serde_json::to_string(&out)?
        };
        println!("{}", json_str);
        return Ok(());
    }

    let Some(detection) = found else {
        println!("NONE {} ({} bytes)", path, bytes.len());
        return Ok(());
    };
    let info = &detection.info;
    let product = &info.product;
    println!(
        "FOUND {} {} {}{}{} at offset {}",
        path,
        product.name,
        product.version_prefix.as_deref().unwrap_or(""),
        product.version,
        product.version_suffix.as_deref().unwrap_or(""),
        detection.offset
    );
    if args.quiet {
        return Ok(());
    }
    println!("  sha256: {}", sha256_hex(bytes));
    if let Some(ref category) = info.category {
        println!("  category: {}", category.name);
    }
    if let Some(ref language) = product.language {
        println!("  language: {}", language);
    }
    if let Some(created) = product.created {
        println!("  created: {}", created.to_rfc3339());
    }
    if let Some(ref camera) = info.camera {
        println!("  camera: {} rev {}", camera.platform, camera.revision);
    }
    if let Some(ref source) = info.source {
        let channel = source.channel.as_deref().unwrap_or("-");
        println!("  source: {} (channel {})", source.name, channel);
        if let Some(ref url) = source.url {
            println!("    url: {}", url);
        }
    }
    if let Some(ref build) = info.build {
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".into());
        println!(
            "  build: name={} status={} changeset={}",
            field(&build.name),
            field(&build.status),
            field(&build.changeset)
        );
    }
    if let Some(ref compiler) = info.compiler {
        match compiler.version {
            Some(v) => println!("  compiler: {} {}", compiler.name, v),
            None => println!("  compiler: {}", compiler.name),
        }
    }
    Ok(())
}
