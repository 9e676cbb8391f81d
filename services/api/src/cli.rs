use crate::demo::{run_assess, run_cohort, run_demo, AssessArgs, CohortArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use osteo_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Bone Health Risk Service",
    about = "Score osteoporosis risk questionnaires over HTTP or from the command line",
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
    /// Score a single questionnaire stored as JSON
    Assess(AssessArgs),
    /// Score every respondent in a CSV export and print a cohort summary
    Cohort(CohortArgs),
    /// Walk through two sample respondents end to end
    Demo,
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
        Command::Assess(args) => run_assess(args),
        Command::Cohort(args) => run_cohort(args),
        Command::Demo => run_demo(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_falls_back_to_serve() {
        let cli = Cli::try_parse_from(["osteo-risk-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn assess_accepts_json_flag() {
        let cli = Cli::try_parse_from(["osteo-risk-api", "assess", "answers.json", "--json"])
            .expect("parses");
        match cli.command {
            Some(Command::Assess(args)) => {
                assert!(args.json);
                assert_eq!(args.input.to_str(), Some("answers.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_port_must_be_numeric() {
        assert!(Cli::try_parse_from(["osteo-risk-api", "serve", "--port", "http"]).is_err());
    }
}
