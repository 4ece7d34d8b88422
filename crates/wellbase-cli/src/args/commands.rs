use crate::types::UnmatchedArg;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show the reservoir directory tree")]
    Tree,

    #[command(about = "Print the path of the first node with the given name")]
    Find { name: String },

    #[command(about = "Aggregate a field folder into per-stage buckets")]
    Fields {
        /// Folder below the reservoirs root
        folder: String,

        /// What to do with files whose stage suffix is unknown
        #[arg(long)]
        unmatched: Option<UnmatchedArg>,
    },

    #[command(about = "Print the raw rows of one CSV file below the reservoirs root")]
    Wells { path: String },

    #[command(about = "Look up a file by name below the files root and print its rows")]
    File { name: String },

    #[command(about = "Load per-well datasets from the data root")]
    Page {
        /// Dataset names, e.g. production,safety,las_docs
        #[arg(long, value_delimiter = ',', required = true)]
        data: Vec<String>,

        /// Well names
        #[arg(long, value_delimiter = ',', required = true)]
        wells: Vec<String>,
    },

    #[command(about = "Enrich a field folder and list its rows by stage")]
    Stages { folder: String },
}
