//! Revision tagging command.

use clap::Args;

use crate::output::{self, OutputFormat};
use relhub_core::config::AppConfig;
use relhub_core::error::AppError;
use relhub_service::RequestContext;

/// Arguments for the tag command
#[derive(Debug, Args)]
pub struct TagArgs {
    /// Release name, e.g. `tooling-0.2.1`
    pub release: String,

    /// Revision number, e.g. `00002`
    pub revision: String,

    /// New tag; pass an empty string to clear
    pub tag: String,

    /// ASF UID recorded as the acting committer
    #[arg(long, env = "RELHUB_ASFUID")]
    pub asfuid: String,
}

/// Execute the tag command
pub async fn execute(
    args: &TagArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let services = super::Services::connect(config).await?;
    let ctx = RequestContext::new(&args.asfuid);

    let result = services
        .tags
        .set_tag_if_modifiable(&ctx, &args.release, &args.revision, &args.tag)
        .await;
    services.close().await;
    let revision = result?;

    match format {
        OutputFormat::Json => output::print_json(&revision)?,
        OutputFormat::Table => match revision.tag.as_deref() {
            Some(tag) => output::print_success(&format!(
                "Revision {} of {} tagged '{tag}'",
                revision.number, args.release
            )),
            None => output::print_success(&format!(
                "Tag cleared on revision {} of {}",
                revision.number, args.release
            )),
        },
    }
    Ok(())
}
