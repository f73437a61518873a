use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use kfp::api::models::ApiResourceType;
use kfp::api::pipeline_service::{ListPipelineVersionsV1Params, ParamsOptions};
use kfp::client::PipelineClient;
use kfp::{CallOptions, CancellationToken, SmolStr};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Kubeflow Pipelines API client")]
struct Cli {
    /// API host (e.g., http://localhost:8888)
    #[arg(long, global = true, default_value = "http://localhost:8888")]
    host: String,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    token: Option<String>,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the versions of a pipeline
    ListPipelineVersions(ListArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Base64-encoded JSON filter
    #[arg(long)]
    filter: Option<String>,

    /// Versions per page
    #[arg(long)]
    page_size: Option<i32>,

    /// Continuation token from a previous page
    #[arg(long)]
    page_token: Option<String>,

    /// ID of the owning resource
    #[arg(long)]
    resource_key_id: Option<String>,

    /// Type of the owning resource (e.g., PIPELINE)
    #[arg(long, default_value_t = ApiResourceType::UnknownResourceType)]
    resource_key_type: ApiResourceType,

    /// "field", "field asc" or "field desc"
    #[arg(long)]
    sort_by: Option<String>,

    /// Request timeout in seconds, 0 for none
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Follow page tokens and print every version
    #[arg(long)]
    all: bool,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "kfp=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let base = kfp::url::Url::parse(&cli.host).into_diagnostic()?;
    let client = PipelineClient::new(base).with_options(CallOptions {
        bearer_token: cli.token.map(SmolStr::from),
        ..Default::default()
    });

    match cli.command {
        Command::ListPipelineVersions(args) => list_pipeline_versions(&client, args).await,
    }
}

async fn list_pipeline_versions(client: &PipelineClient, args: ListArgs) -> miette::Result<()> {
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let mut params = ListPipelineVersionsV1Params::with_options(
        ParamsOptions::builder()
            .timeout(Duration::from_secs(args.timeout))
            .context(cancel)
            .build(),
    )
    .with_resource_key_type(args.resource_key_type);
    params.set_filter(args.filter.map(SmolStr::from));
    params.set_page_size(args.page_size);
    params.set_page_token(args.page_token.map(SmolStr::from));
    params.set_resource_key_id(args.resource_key_id.map(SmolStr::from));
    params.set_sort_by(args.sort_by.map(SmolStr::from));

    let out = if args.all {
        let versions = client.list_all_pipeline_versions_v1(params).await?;
        serde_json::to_string_pretty(&versions).into_diagnostic()?
    } else {
        let page = client.list_pipeline_versions_v1(&params).await?;
        serde_json::to_string_pretty(&page).into_diagnostic()?
    };

    println!("{}", out);
    Ok(())
}
