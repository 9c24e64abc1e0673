use clap::{Args, Parser, Subcommand};
use excerpt::model::ExcerptKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "excerpt", bin_name = "excerpt", version)]
#[command(about = "Turn book excerpts into shareable cards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render an excerpt card to a PNG file
    #[command(display_order = 10)]
    Card(CardArgs),

    /// Parse a Books excerpt and print its fields
    #[command(display_order = 11)]
    Parse {
        /// Read the excerpt from stdin instead of the clipboard
        #[arg(long)]
        stdin: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or set the kind new excerpts start with
    #[command(display_order = 20)]
    Kind {
        /// general or poem
        kind: Option<ExcerptKind>,
    },

    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (e.g., width)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct CardArgs {
    /// Excerpt text
    #[arg(short, long)]
    pub content: Option<String>,

    /// Book title
    #[arg(short, long)]
    pub book: Option<String>,

    /// Author name
    #[arg(short, long)]
    pub author: Option<String>,

    /// Excerpt kind (general or poem); remembered for next time
    #[arg(short, long)]
    pub kind: Option<ExcerptKind>,

    /// Import a Books excerpt from the clipboard
    #[arg(long, conflicts_with = "stdin")]
    pub paste: bool,

    /// Import a Books excerpt from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Review the fields in $EDITOR before rendering
    #[arg(short, long)]
    pub edit: bool,

    /// Output file
    #[arg(short, long, default_value = "excerpt-card.png")]
    pub output: PathBuf,

    /// Card width in points (overrides config)
    #[arg(long)]
    pub width: Option<f32>,

    /// Pixels per point (overrides config)
    #[arg(long)]
    pub scale: Option<f32>,

    /// Font family, font file, or `builtin` (overrides config)
    #[arg(long)]
    pub font: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card_flags() {
        let cli = Cli::try_parse_from([
            "excerpt", "card", "--stdin", "--kind", "poem", "-o", "out.png", "--width", "390",
        ])
        .unwrap();
        match cli.command {
            Commands::Card(args) => {
                assert!(args.stdin);
                assert_eq!(args.kind, Some(ExcerptKind::Poem));
                assert_eq!(args.output, PathBuf::from("out.png"));
                assert_eq!(args.width, Some(390.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_card_default_output() {
        let cli = Cli::try_parse_from(["excerpt", "card", "-c", "Hi"]).unwrap();
        match cli.command {
            Commands::Card(args) => {
                assert_eq!(args.output, PathBuf::from("excerpt-card.png"));
                assert_eq!(args.content.as_deref(), Some("Hi"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_paste_conflicts_with_stdin() {
        assert!(Cli::try_parse_from(["excerpt", "card", "--paste", "--stdin"]).is_err());
    }

    #[test]
    fn test_kind_rejects_unknown() {
        assert!(Cli::try_parse_from(["excerpt", "kind", "sonnet"]).is_err());
        let cli = Cli::try_parse_from(["excerpt", "kind", "general", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
