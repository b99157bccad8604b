use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "salience")]
#[command(version)]
#[command(about = "Attention-scored context selection for autonomous agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the store and start a session
    Init,

    /// Track a file with trigger keywords
    Track {
        path: String,

        /// Comma-separated trigger keywords
        #[arg(short, long, value_delimiter = ',')]
        keywords: Vec<String>,

        /// Comma-separated co-activation partner paths
        #[arg(short, long, value_delimiter = ',')]
        coactivate: Vec<String>,

        /// Keep the file at least WARM
        #[arg(short, long)]
        pinned: bool,
    },

    /// Stop tracking a file
    Untrack { path: String },

    /// Score one turn and print the recommended context
    Turn {
        message: String,

        /// Explicit turn number (defaults to the next in the session)
        #[arg(short, long)]
        number: Option<u64>,
    },

    /// Show tier counts for the tracked set
    Status,

    /// List recorded sessions
    Sessions,

    /// Show records for a session
    History {
        /// Session id (defaults to the active session)
        #[arg(short, long)]
        session: Option<String>,

        /// Show at most this many records
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Usage statistics for one file
    File { path: String },

    /// Aggregate history report
    Report {
        #[arg(long, default_value_t = salience_ledger::DEFAULT_MIN_APPEARANCES)]
        min_appearances: usize,

        #[arg(long, default_value_t = salience_ledger::DEFAULT_HOT_RATIO_THRESHOLD)]
        hot_ratio: f64,
    },

    /// Zero all scores (registrations survive unless --full)
    Reset {
        /// Drop registrations too
        #[arg(long)]
        full: bool,
    },

    /// Delete history records
    Clear {
        /// Only records older than this many days
        #[arg(long)]
        older_than_days: Option<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::try_parse_from(["salience", "init"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Init));
    }

    #[test]
    fn test_cli_parse_track_with_keywords() {
        let cli = Cli::try_parse_from([
            "salience",
            "track",
            "notes/git.md",
            "--keywords",
            "git,commit",
            "--pinned",
        ]);
        assert!(cli.is_ok());
        if let Commands::Track {
            path,
            keywords,
            pinned,
            ..
        } = cli.unwrap().command
        {
            assert_eq!(path, "notes/git.md");
            assert_eq!(keywords, vec!["git", "commit"]);
            assert!(pinned);
        } else {
            panic!("Expected Track command");
        }
    }

    #[test]
    fn test_cli_parse_turn_with_number() {
        let cli = Cli::try_parse_from(["salience", "turn", "how do I commit", "--number", "7"]);
        assert!(cli.is_ok());
        if let Commands::Turn { message, number } = cli.unwrap().command {
            assert_eq!(message, "how do I commit");
            assert_eq!(number, Some(7));
        } else {
            panic!("Expected Turn command");
        }
    }

    #[test]
    fn test_cli_parse_report_defaults() {
        let cli = Cli::try_parse_from(["salience", "report"]);
        assert!(cli.is_ok());
        if let Commands::Report {
            min_appearances,
            hot_ratio,
        } = cli.unwrap().command
        {
            assert_eq!(min_appearances, salience_ledger::DEFAULT_MIN_APPEARANCES);
            assert_eq!(hot_ratio, salience_ledger::DEFAULT_HOT_RATIO_THRESHOLD);
        } else {
            panic!("Expected Report command");
        }
    }

    #[test]
    fn test_cli_parse_clear_with_cutoff() {
        let cli = Cli::try_parse_from(["salience", "clear", "--older-than-days", "30"]);
        assert!(cli.is_ok());
        if let Commands::Clear { older_than_days } = cli.unwrap().command {
            assert_eq!(older_than_days, Some(30));
        } else {
            panic!("Expected Clear command");
        }
    }
}
