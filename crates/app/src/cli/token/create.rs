use clap::Args;
use frameshop_app::{auth::PgAuthService, domain::principals::records::PrincipalUuid};
use jiff::Timestamp;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Principal that should own the token
    #[arg(long)]
    principal_uuid: Uuid,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    if let Some(expires_at) = args.expires_at
        && expires_at <= Timestamp::now()
    {
        return Err("expires-at must be in the future".to_string());
    }

    let service = PgAuthService::new(crate::cli::connect(&args.database_url).await?);

    let issued = service
        .issue_api_token(PrincipalUuid::from_uuid(args.principal_uuid), args.expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.record.uuid);
    println!("principal_uuid: {}", issued.record.principal_uuid);
    println!("created_at: {}", issued.record.created_at);
    if let Some(expires_at) = issued.record.expires_at {
        println!("expires_at: {expires_at}");
    }
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
