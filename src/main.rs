use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use trello_app_config::{AppConfig, AppError};

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::build()?;
    let bundle = config.load_bundle()?;
    info!("Using bundle at {}", bundle.root().display());

    let mappings = bundle.resource_path(config.mapping_definitions_filename());
    if mappings.is_file() {
        info!("Found mapping definitions at {}", mappings.display());
    } else {
        warn!("Mapping definitions not found at {}", mappings.display());
    }

    let app_name = config.oauth_app_name(&bundle);
    match &app_name {
        Some(name) => info!("OAuth app name resolved to {name:?}"),
        None => warn!("Bundle declares no CFBundleDisplayName; OAuth app name is unavailable"),
    }

    println!("mapping_definitions_filename = {}", config.mapping_definitions_filename());
    println!("api_base_url = {}", config.api_base_url());
    println!("members_url = {}", config.api_url("members/me")?);
    println!("oauth_app_name = {}", app_name.as_deref().unwrap_or("<unavailable>"));

    Ok(())
}
