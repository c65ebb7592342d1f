use crate::output::write_json;
use clap::Subcommand;
use labkeep_core::config::{Config, WarnLevel};
use std::io::Write;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run<W: Write>(out: &mut W, config: &Config, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(out, config, json),
        ConfigSubcommand::Validate => validate(out, config, json),
    }
}

fn show<W: Write>(out: &mut W, config: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        return write_json(out, config);
    }
    write!(out, "{}", config.to_yaml()?)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate<W: Write>(out: &mut W, config: &Config, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate();

    if json {
        write_json(out, &serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        writeln!(out, "Config is valid. No warnings.")?;
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            writeln!(out, "[{prefix}] {}", w.message)?;
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}
