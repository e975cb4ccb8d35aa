use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the Unicode code points of a text.
    /// Uses a built-in sample when no text is given.
    Codepoints {
        /// Text to convert
        text: Option<String>,
    },

    /// Rebuild text from a list of code points
    Decode {
        /// Code points, e.g. 72 105
        #[clap(required = true)]
        codes: Vec<u32>,
    },

    /// Load the configured embedding model and print its details.
    /// Downloads the model if it is not cached yet.
    Model {},

    /// Print the embedding vector of a text
    Embed {
        /// Text to embed
        text: String,
    },

    /// Print the semantic similarity of two texts
    Similarity {
        text1: String,
        text2: String,
    },

    /// Find the document closest in meaning to a query
    Search {
        /// Search query
        #[clap(short, long)]
        query: String,

        /// Candidate documents
        #[clap(required = true)]
        documents: Vec<String>,
    },

    /// Run the built-in semantic search example (default)
    Demo {},
}
