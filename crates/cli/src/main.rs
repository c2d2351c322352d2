use anyhow::Result;
use clap::Parser;
use color_eyre::config::HookBuilder;
use s3_upload_core::UploadDescriptor;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod handlers;

/// s3-upload - upload build artifacts to an S3 bucket
#[derive(Parser, Debug)]
#[command(name = "s3-upload")]
#[command(version)]
#[command(about = "Upload a fixed list of local files to an S3 bucket", long_about = None)]
struct Cli {
    /// TOML file with upload settings (flags override its values)
    #[arg(short, long, env = "S3_UPLOAD_CONFIG")]
    config: Option<PathBuf>,

    /// Access key, used only together with --secret-key
    #[arg(long, env = "S3_UPLOAD_ACCESS_KEY", hide_env_values = true)]
    access_key: Option<String>,

    /// Secret key, used only together with --access-key
    #[arg(long, env = "S3_UPLOAD_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Target bucket
    #[arg(short, long, env = "S3_UPLOAD_BUCKET_NAME")]
    bucket_name: Option<String>,

    /// Override the service endpoint (bare hosts are reached over https)
    #[arg(long, env = "S3_UPLOAD_ENDPOINT")]
    endpoint: Option<String>,

    /// Signing region
    #[arg(long, env = "S3_UPLOAD_REGION")]
    region: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long)]
    force_path_style: bool,

    /// Validate inputs and check the bucket, but upload nothing
    #[arg(long, env = "S3_UPLOAD_DO_NOT_UPLOAD")]
    do_not_upload: bool,

    /// Single file to upload (uploaded after every --file)
    #[arg(long)]
    source_file: Option<String>,

    /// Key for --source-file
    #[arg(long)]
    destination_file: Option<String>,

    /// File to upload, repeatable
    #[arg(short, long = "file", value_name = "SOURCE=DESTINATION")]
    files: Vec<UploadDescriptor>,

    /// Attempt every file and report all failures instead of stopping at the first
    #[arg(long)]
    continue_on_error: bool,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    if let Err(e) = HookBuilder::default().install() {
        eprintln!("Warning: Failed to install error handler: {}", e);
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    handlers::handle_upload(cli).await
}
