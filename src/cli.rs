//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::customer::record::CustomerAttributes;

/// Top-level CLI parser for `customer-id`.
#[derive(Debug, Parser)]
#[command(name = "customer-id", version, about = "Assign and maintain structured customer IDs")]
pub struct Cli {
    /// YAML config file. Environment variables (and `.env`) are used when omitted.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Classification attributes shared by `generate` and `preview`.
#[derive(Debug, Clone, Args)]
pub struct AttributeArgs {
    /// Region label, e.g. `1北投`.
    #[arg(long)]
    pub region: String,
    /// Category label, e.g. `2單一客戶`.
    #[arg(long)]
    pub category: String,
    /// Company name.
    #[arg(long = "company")]
    pub company_name: String,
    /// Extra-region label, e.g. `1本縣市`.
    #[arg(long)]
    pub extra_region_code: Option<String>,
    /// Branch name.
    #[arg(long = "branch")]
    pub branch_name: Option<String>,
    /// Branch-handling label, e.g. `00開立發票客編`.
    #[arg(long)]
    pub branch_handling: Option<String>,
}

impl AttributeArgs {
    /// Converts to normalized attributes.
    #[must_use]
    pub fn to_attributes(&self) -> CustomerAttributes {
        CustomerAttributes {
            region: self.region.clone(),
            category: self.category.clone(),
            company_name: self.company_name.clone(),
            extra_region_code: self.extra_region_code.clone(),
            branch_name: self.branch_name.clone(),
            branch_handling: self.branch_handling.clone(),
        }
        .normalized()
    }
}

/// Lookup tables that `options` can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionTable {
    /// Region labels.
    Regions,
    /// Category labels.
    Categories,
    /// Extra-region labels.
    ExtraRegionCodes,
    /// Branch-handling labels.
    BranchHandlings,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute an ID; persist it only with `--confirm`.
    Generate {
        /// Attributes the ID is derived from.
        #[command(flatten)]
        attributes: AttributeArgs,
        /// Record the ID instead of previewing it.
        #[arg(long)]
        confirm: bool,
    },
    /// Show the ID the attributes would receive without recording it.
    Preview {
        /// Attributes the ID is derived from.
        #[command(flatten)]
        attributes: AttributeArgs,
    },
    /// List rows whose company name matches exactly.
    Query {
        /// Exact company name.
        company_name: String,
        /// Only rows with this branch-handling label.
        #[arg(long)]
        branch_handling: Option<String>,
    },
    /// Search company names by substring.
    SearchCompany {
        /// Case-insensitive substring.
        keyword: String,
        /// Only rows in this region.
        #[arg(long)]
        region: Option<String>,
        /// Only rows in this category.
        #[arg(long)]
        category: Option<String>,
    },
    /// Search branch names by substring.
    SearchBranch {
        /// Case-insensitive substring.
        keyword: String,
        /// Only rows in this region.
        #[arg(long)]
        region: Option<String>,
        /// Only rows in this category.
        #[arg(long)]
        category: Option<String>,
        /// Only rows of this company.
        #[arg(long = "company")]
        company_name: Option<String>,
    },
    /// Search customer IDs by substring.
    SearchIds {
        /// Substring of the ID.
        keyword: String,
    },
    /// Correct the company and/or branch name recorded for an ID.
    Update {
        /// ID whose rows are corrected.
        customer_id: String,
        /// New company name.
        #[arg(long = "company")]
        new_company_name: Option<String>,
        /// New branch name.
        #[arg(long = "branch")]
        new_branch_name: Option<String>,
    },
    /// Delete the rows carrying an ID.
    Delete {
        /// ID to delete.
        customer_id: String,
    },
    /// Merge a CSV table file into the table.
    Import {
        /// CSV file with the canonical header row.
        file: PathBuf,
    },
    /// Write the whole table as CSV.
    Export {
        /// Destination file; stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the labels of a lookup table.
    Options {
        /// Which table.
        #[arg(value_enum)]
        table: OptionTable,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, OptionTable};
    use clap::Parser;

    #[test]
    fn parses_generate_with_confirm() {
        let cli = Cli::parse_from([
            "customer-id",
            "generate",
            "--region",
            "1北投",
            "--category",
            "2單一客戶",
            "--company",
            "Acme",
            "--confirm",
        ]);
        let Command::Generate { attributes, confirm } = cli.command else {
            panic!("expected generate");
        };
        assert!(confirm);
        assert_eq!(attributes.to_attributes().company_name, "Acme");
    }

    #[test]
    fn empty_branch_is_absent() {
        let cli = Cli::parse_from([
            "customer-id",
            "preview",
            "--region",
            "1北投",
            "--category",
            "2單一客戶",
            "--company",
            "Acme",
            "--branch",
            "",
        ]);
        let Command::Preview { attributes } = cli.command else {
            panic!("expected preview");
        };
        assert_eq!(attributes.to_attributes().branch_name, None);
    }

    #[test]
    fn parses_options_table() {
        let cli = Cli::parse_from(["customer-id", "options", "extra-region-codes"]);
        assert!(matches!(cli.command, Command::Options { table: OptionTable::ExtraRegionCodes }));
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["customer-id", "search-ids", "1200", "--config", "ids.yaml"]);
        assert_eq!(cli.config.unwrap().to_str(), Some("ids.yaml"));
    }

    #[test]
    fn generate_requires_company() {
        let result = Cli::try_parse_from([
            "customer-id",
            "generate",
            "--region",
            "1北投",
            "--category",
            "2單一客戶",
        ]);
        assert!(result.is_err());
    }
}
