use crate::demo::{run_catalog, run_demo, run_score, CatalogArgs, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use emotion_assessment::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Emotion Assessment",
    about = "Score emotion questionnaires and serve the assessment API",
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
    /// Score a saved response document and print the report
    Score(ScoreArgs),
    /// Print the catalog surfaced by an instrument variant as JSON
    Catalog(CatalogArgs),
    /// Score a built-in sample session end to end
    Demo(DemoArgs),
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
        Command::Score(args) => run_score(args),
        Command::Catalog(args) => run_catalog(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn score_command_parses_options() {
        let cli = Cli::try_parse_from([
            "emotion-assessment-api",
            "score",
            "--responses",
            "answers.json",
            "--variant",
            "quick",
            "--format",
            "csv",
            "--date",
            "2026-02-03",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.responses.to_str(), Some("answers.json"));
                assert_eq!(
                    args.variant,
                    Some(emotion_assessment::assessment::catalog::InstrumentVariant::Quick)
                );
                assert_eq!(
                    args.format,
                    emotion_assessment::assessment::report::ExportFormat::Csv
                );
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_variant() {
        let err = Cli::try_parse_from(["emotion-assessment-api", "catalog", "--variant", "daily"])
            .expect_err("unknown variant");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
