use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct PrincipalCommand {
    #[command(subcommand)]
    command: PrincipalSubcommand,
}

#[derive(Debug, Subcommand)]
enum PrincipalSubcommand {
    Create(create::CreatePrincipalArgs),
}

pub(crate) async fn run(command: PrincipalCommand) -> Result<(), String> {
    match command.command {
        PrincipalSubcommand::Create(args) => create::run(args).await,
    }
}
