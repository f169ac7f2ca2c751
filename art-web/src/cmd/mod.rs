//! cmd

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use strum::AsRefStr;

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct ArtCli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Parser)]
pub enum Commands {
    #[command(name = "run", about = "serve the asset tracking api")]
    Run {
        #[arg(long, short, value_parser = verify_input_file, default_value = "config.toml", action=ArgAction::Set)]
        config: PathBuf,
    },
    #[command(name = "import", about = "bulk import records from a csv file")]
    Import {
        #[arg(long, short, value_parser = verify_input_file, default_value = "config.toml", action=ArgAction::Set)]
        config: PathBuf,
        #[arg(long, short, value_enum)]
        kind: ImportKind,
        #[arg(long, short, value_parser = verify_input_file)]
        file: PathBuf,
        /// where to write the rows that were skipped
        #[arg(long, short)]
        report: Option<PathBuf>,
    },
}

/// What a csv file holds. `All` walks the hierarchy top-down over one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ImportKind {
    Category,
    SubCategory,
    Type,
    Make,
    Model,
    Asset,
    All,
}

impl ImportKind {
    pub const HIERARCHY: [ImportKind; 6] = [
        ImportKind::Category,
        ImportKind::SubCategory,
        ImportKind::Type,
        ImportKind::Make,
        ImportKind::Model,
        ImportKind::Asset,
    ];
}

fn verify_input_file(input: &str) -> anyhow::Result<PathBuf> {
    let pb = PathBuf::from(input);
    if pb.exists() {
        anyhow::Ok(pb)
    } else {
        anyhow::bail!("file {input} does not exist")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_requires_existing_file() {
        let err = ArtCli::try_parse_from([
            "art-web",
            "import",
            "--kind",
            "asset",
            "--file",
            "/definitely/not/here.csv",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn import_kind_names() {
        assert_eq!(ImportKind::SubCategory.as_ref(), "sub-category");
    }
}
