use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use log::info;

use ltpl::{Engine, Template, Values};

#[derive(Parser)]
#[command(name = "ltpl")]
#[command(about = "Render a template with values read from a JSON file", long_about = None)]
struct Cli {
    /// Template file to render
    template: PathBuf,

    /// JSON object holding the values, applied in document order
    #[arg(long, short)]
    values: Option<PathBuf>,

    /// Text put between the rendered rows of a block. `\n`, `\t` and `\\` are unescaped
    #[arg(long, default_value = "\\n")]
    separator: String,

    /// Refuse templates whose blocks are not properly closed
    #[arg(long)]
    strict: bool,

    /// Print the tokens and blocks of the template instead of rendering it
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.list {
        let source = fs::read_to_string(&cli.template)
            .with_context(|| format!("Error loading template file: {}", cli.template.display()))?;
        let tpl = Template::new(&cli.template.to_string_lossy(), None, &source)?;
        for name in tpl.placeholders() {
            println!("token {}", name);
        }
        for name in tpl.blocks() {
            println!("block {}", name);
        }
        return Ok(());
    }

    let values = match cli.values {
        Some(ref path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read values from {}", path.display()))?;
            let json: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            Values::from_value(json)?
        }
        None => Values::new(),
    };
    info!("Rendering {} with {} value(s)", cli.template.display(), values.len());

    let mut engine = Engine::default();
    engine.set_row_separator(&unescape(&cli.separator));
    engine.set_strict_blocks(cli.strict);

    let rendered = engine.render_file(&cli.template, &values)?;
    print!("{}", rendered);
    Ok(())
}

/// Turns `\n`, `\t` and `\\` into the characters they stand for, other escapes are kept as is
fn unescape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
