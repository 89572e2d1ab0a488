use anyhow::{Context, Result};
use apot_core::{ApotQuantizer, Quantizer, QuantizerConfig, UniformQuantizer};
use apot_math::Tensor;
use clap::Parser;
use rand::Rng;
use std::path::PathBuf;

/// Print an APoT level table and quantize values against it
///
/// Values come from `--values`, or `--random N` uniform samples in [0, 1).
/// With `k = 1` the codes are compared against uniform quantization of the
/// same input.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Total bit width b
    #[arg(long, default_value_t = 4)]
    bits: u32,

    /// Bits per additive term k
    #[arg(long, default_value_t = 2)]
    level_bits: u32,

    /// Allow negative levels
    #[arg(long, default_value_t = false)]
    signed: bool,

    /// JSON quantizer config; overrides --bits/--level-bits/--signed
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated values to quantize
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    values: Vec<f32>,

    /// Quantize N random values in [0, 1) instead
    #[arg(long)]
    random: Option<usize>,

    /// Skip printing the level table
    #[arg(long, default_value_t = false)]
    quiet_levels: bool,
}

fn load_config(args: &Args) -> Result<QuantizerConfig> {
    match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            let config: QuantizerConfig = serde_json::from_str(&text)
                .with_context(|| format!("parse config {}", path.display()))?;
            config.validate().context("validate config")?;
            Ok(config)
        }
        None => QuantizerConfig::new(args.bits, args.level_bits, args.signed)
            .context("build config from flags"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    let quantizer = ApotQuantizer::new(config).context("build level table")?;
    let table = quantizer.level_table();

    println!("=== APoT Quantizer ===");
    println!(
        "  b={} k={} signed={}  terms={}  levels={}",
        config.bit_width,
        config.level_bits,
        config.signed,
        config.num_terms(),
        table.len()
    );

    if !args.quiet_levels {
        println!("\n  {:>5}  {:>6}  {:>12}", "pos", "code", "level");
        for (i, (&level, &code)) in table.levels().iter().zip(table.codes()).enumerate() {
            println!("  {:>5}  {:>6}  {:>12.8}", i, code, level);
        }
    }

    let values: Vec<f32> = match args.random {
        Some(n) => {
            let mut rng = rand::thread_rng();
            (0..n).map(|_| rng.gen::<f32>()).collect()
        }
        None => args.values.clone(),
    };
    if values.is_empty() {
        return Ok(());
    }

    let input = Tensor::from_f32(&values);
    let codes = quantizer.quantize_with(&input, true);
    let levels = quantizer.quantize_with(&input, false);
    let uniform = if config.level_bits == 1 && !config.signed {
        Some(UniformQuantizer::unit_range(config.bit_width)?.quantize(&input))
    } else {
        None
    };

    println!("\n  {:>12}  {:>6}  {:>12}  {:>8}", "input", "code", "level", "uniform");
    let code_slice = codes.codes().unwrap_or_default();
    let level_slice = levels.levels().unwrap_or_default();
    let uniform_slice = uniform.as_ref().and_then(|u| u.codes()).unwrap_or_default();
    let mut mismatches = 0usize;
    for (i, &x) in values.iter().enumerate() {
        let reference = match uniform_slice.get(i) {
            Some(&u) => {
                if u != code_slice[i] {
                    mismatches += 1;
                }
                u.to_string()
            }
            None => "-".to_string(),
        };
        println!(
            "  {:>12.6}  {:>6}  {:>12.8}  {:>8}",
            x, code_slice[i], level_slice[i], reference
        );
    }

    let max_err = values
        .iter()
        .zip(level_slice)
        .map(|(&x, &l)| (x as f64 - l).abs())
        .fold(0.0f64, f64::max);
    println!("\n  max |x|         = {:.6}", input.max_abs());
    println!("  max |x - level| = {:.6}", max_err);
    if uniform.is_some() {
        println!("  uniform mismatches: {}", mismatches);
    }

    match quantizer.dequantize(&codes) {
        Ok(_) => println!("  dequantize: ok"),
        Err(e) => println!("  dequantize: {}", e),
    }

    Ok(())
}
