use crate::commands::{run_evaluate, run_optimize, run_rules, EvaluateArgs, OptimizeArgs, RulesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use content_compliance::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Content Compliance",
    about = "Score content against the compliance rule catalog and remediate it",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a document without changing it
    Evaluate(EvaluateArgs),
    /// Remediate a document until the targets are met or the retry budget runs out
    Optimize(OptimizeArgs),
    /// List the rule catalog
    Rules(RulesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Optimize(args) => run_optimize(args),
        Command::Rules(args) => run_rules(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_defaults_to_serve() {
        let cli = Cli::try_parse_from(["content-compliance-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn optimize_flags_parse() {
        let cli = Cli::try_parse_from([
            "content-compliance-api",
            "optimize",
            "--input",
            "draft.md",
            "--target-score",
            "95",
            "--max-retries",
            "2",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Optimize(args)) => {
                assert_eq!(args.input.to_str(), Some("draft.md"));
                assert_eq!(args.target_score, Some(95));
                assert_eq!(args.max_retries, Some(2));
                assert!(args.json);
                assert!(args.output.is_none());
            }
            other => panic!("expected optimize command, got {other:?}"),
        }
    }

    #[test]
    fn target_score_above_one_hundred_is_rejected() {
        let result = Cli::try_parse_from([
            "content-compliance-api",
            "optimize",
            "--target-score",
            "101",
        ]);
        assert!(result.is_err());
    }
}
