use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use letter_core::render;
use letter_export::{ExportConfig, export_pdf, export_png};

mod assets;
mod session_file;

use assets::{DirAssets, TokioDelay};
use session_file::SessionFile;

/// Render a shipping letter or address-label sheet from a saved session.
#[derive(Parser, Debug)]
#[command(name = "letter", version, about)]
struct Cli {
    /// Session JSON: letterType plus the filled-in form(s)
    input: PathBuf,

    /// Output file (.pdf or .png). Defaults to <type>-letter.pdf
    output: Option<PathBuf>,

    /// Directory holding image assets such as logo.svg
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Oversampling factor for the captured bitmap
    #[arg(long, default_value_t = letter_core::constants::OVERSAMPLE)]
    scale: f32,

    /// Longest wait for image assets before capturing anyway
    #[arg(long, default_value_t = letter_core::constants::SETTLE_TIMEOUT.as_millis() as u64)]
    settle_timeout_ms: u64,

    /// Reorder label slots before export, e.g. --move 0:2 (repeatable)
    #[arg(long = "move", value_name = "FROM:TO", value_parser = parse_move)]
    moves: Vec<(usize, usize)>,

    /// Write the laid-out SVG to stdout instead of exporting
    #[arg(long)]
    print: bool,
}

fn parse_move(s: &str) -> Result<(usize, usize), String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|_| format!("`{v}` is not a slot position"))
    };
    Ok((parse(from)?, parse(to)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let text = tokio::fs::read_to_string(&cli.input)
        .await
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let request = SessionFile::parse(&text)?.into_request(&cli.moves)?;
    let doc = render(&request);

    if cli.print {
        std::io::stdout()
            .write_all(doc.svg.as_bytes())
            .context("writing SVG to stdout")?;
        return Ok(());
    }

    let config = ExportConfig {
        scale: cli.scale,
        settle_timeout: Duration::from_millis(cli.settle_timeout_ms),
    };
    let source = DirAssets::new(&cli.assets);
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(doc.letter_type.file_name()));
    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let exported = match ext.as_deref() {
        Some("pdf") => export_pdf(Some(&doc), &source, &TokioDelay, &config).await,
        Some("png") => export_png(Some(&doc), &source, &TokioDelay, &config).await,
        _ => bail!("output must end in .pdf or .png: {}", output.display()),
    }
    .context("export failed; nothing was written")?;

    let Some(file) = exported else {
        bail!("nothing was rendered");
    };
    tokio::fs::write(&output, &file.bytes)
        .await
        .with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(
        path = %output.display(),
        letter = %doc.letter_type,
        bytes = file.bytes.len(),
        "written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_flags_parse() {
        assert_eq!(parse_move("0:2"), Ok((0, 2)));
        assert_eq!(parse_move(" 3 : 1 "), Ok((3, 1)));
        assert!(parse_move("02").is_err());
        assert!(parse_move("a:1").is_err());
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["letter", "session.json", "--move", "0:1", "--move", "2:3"]).unwrap();
        assert_eq!(cli.moves, vec![(0, 1), (2, 3)]);
        assert_eq!(cli.assets, PathBuf::from("assets"));
        assert_eq!(cli.scale, 3.0);
        assert_eq!(cli.settle_timeout_ms, 5000);
        assert!(cli.output.is_none());
        assert!(!cli.print);
    }
}
