use std::sync::Arc;

use clap::Args;
use frameshop_app::{
    blobs::LocalBlobStore,
    domain::principals::{
        PgPrincipalsService, PrincipalsService,
        data::NewPrincipal,
        records::{PrincipalUuid, Role},
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreatePrincipalArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Directory holding stored images
    #[arg(long, env = "MEDIA_ROOT", default_value = "./media")]
    media_root: String,

    /// Unique login name
    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    /// One of customer, employee or admin
    #[arg(long, default_value = "customer")]
    role: String,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    phone: Option<String>,
}

pub(crate) async fn run(args: CreatePrincipalArgs) -> Result<(), String> {
    let role = args
        .role
        .parse::<Role>()
        .map_err(|error| error.to_string())?;

    let db = crate::cli::connect(&args.database_url).await?;
    let service = PgPrincipalsService::new(db, Arc::new(LocalBlobStore::new(args.media_root)));

    let principal = service
        .create_principal(NewPrincipal {
            uuid: PrincipalUuid::new(),
            username: args.username,
            name: args.name,
            email: args.email,
            phone: args.phone,
            role,
        })
        .await
        .map_err(|error| format!("failed to create principal: {error}"))?;

    println!("principal_uuid: {}", principal.uuid);
    println!("username: {}", principal.username);
    println!("role: {}", principal.role);

    Ok(())
}
