//! # `ralg generate`
//!
//! Builds a radical set from `--radicals` or `--preset` (Wu Xing by
//! default), generates the tensor of the requested rank, and prints it as
//! text or JSON.
//!
//! ```bash
//! ralg generate                          # Wu Xing, rank 2
//! ralg generate --rank 3                 # Wu Xing, rank 3 blocks
//! ralg generate --radicals 日月 --format json
//! ```

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ralg_core::RadicalSet;
use ralg_tensor::Engine;

use crate::render;

/// Output format shared by the subcommands.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for `ralg generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Tensor rank, 2 through 5.
    #[arg(long, default_value_t = 2)]
    pub rank: usize,

    /// Radicals as a string, one character per radical (e.g. 日月).
    #[arg(long, conflicts_with = "preset")]
    pub radicals: Option<String>,

    /// Preset radical set (wu-xing).
    #[arg(long)]
    pub preset: Option<String>,

    /// Name for a `--radicals` set.
    #[arg(long, default_value = "custom")]
    pub name: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute `ralg generate`.
pub fn run_generate(args: &GenerateArgs, engine: &Engine) -> Result<u8> {
    print!("{}", generate_output(args, engine)?);
    Ok(0)
}

/// Render the requested tensor without printing it.
pub fn generate_output(args: &GenerateArgs, engine: &Engine) -> Result<String> {
    let set = radical_set(args, engine)?;
    tracing::info!(set = %set, rank = args.rank, "generating tensor");
    let tensor = engine
        .generate(&set, args.rank)
        .with_context(|| format!("cannot generate rank-{} tensor over {set}", args.rank))?;

    match args.format {
        OutputFormat::Json => {
            let mut json = render::render_json(&tensor)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => {
            let commitment = tensor
                .commitment()
                .context("failed to compute tensor commitment")?;
            Ok(format!(
                "{}\n{}\ncommitment: {commitment}\n",
                render::render_text(&tensor),
                render::summary_line(&tensor),
            ))
        }
    }
}

fn radical_set(args: &GenerateArgs, engine: &Engine) -> Result<RadicalSet> {
    if let Some(chars) = &args.radicals {
        return engine
            .radical_set(&args.name, chars)
            .with_context(|| format!("invalid radicals {chars:?}"));
    }
    let preset = args.preset.as_deref().unwrap_or("wu-xing");
    engine
        .preset(preset)
        .with_context(|| format!("unknown preset '{preset}' (available: wu-xing)"))?
        .with_context(|| format!("preset '{preset}' failed validation"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(rank: usize, radicals: Option<&str>, format: OutputFormat) -> GenerateArgs {
        GenerateArgs {
            rank,
            radicals: radicals.map(str::to_string),
            preset: None,
            name: "custom".into(),
            format,
        }
    }

    #[test]
    fn default_is_wu_xing_matrix() {
        let engine = Engine::embedded().unwrap();
        let out = generate_output(&args(2, None, OutputFormat::Text), &engine).unwrap();
        assert!(out.starts_with("    金  木  水  火  土\n"));
        assert!(out.contains("木  --  林"));
        assert!(out.contains("五行 [金木水火土] rank 2"));
        assert!(out.contains("commitment: sha256:"));
    }

    #[test]
    fn custom_radicals_json() {
        let engine = Engine::embedded().unwrap();
        let out = generate_output(&args(2, Some("日月"), OutputFormat::Json), &engine).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["tensor"]["radical_set"]["name"], "custom");
        // (日,日) has two candidates; 昌 has the lower code point.
        assert_eq!(json["tensor"]["cells"][0]["character"], "昌");
        assert_eq!(json["tensor"]["cells"][1]["character"], "明");
        assert_eq!(json["tensor"]["cells"][3]["character"], "朋");
    }

    #[test]
    fn rank_out_of_range_is_error() {
        let engine = Engine::embedded().unwrap();
        let err = generate_output(&args(6, None, OutputFormat::Text), &engine).unwrap_err();
        assert!(format!("{err:#}").contains("rank must be between 2 and 5"));
    }

    #[test]
    fn duplicate_radicals_are_error() {
        let engine = Engine::embedded().unwrap();
        let err = generate_output(&args(2, Some("日日"), OutputFormat::Text), &engine).unwrap_err();
        assert!(format!("{err:#}").contains("appears at positions 0 and 1"));
    }

    #[test]
    fn unknown_preset_is_error() {
        let engine = Engine::embedded().unwrap();
        let mut a = args(2, None, OutputFormat::Text);
        a.preset = Some("bagua".into());
        assert!(generate_output(&a, &engine).is_err());
    }
}
