use crate::context::AppContext;
use crate::format::{self, Formattable, OutputFormat};
use libtaglist::{MAX_ATTEMPTS, RegistryClient, TagsOutcome};
use serde::Serialize;
use tracing::info;

/// Tags of one repository, as printed by the CLI
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TagsOutput {
    pub registry: String,
    pub repository: String,
    pub tags: Vec<String>,
}

impl Formattable for TagsOutput {
    fn format_pretty(&self) -> String {
        self.tags.join("\n")
    }
}

/// Full repository path, e.g. `library/alpine`
pub fn repository_name(repo: &str, image: &str) -> String {
    if repo.is_empty() {
        image.to_string()
    } else {
        format!("{}/{}", repo, image)
    }
}

/// Why a listing produced no tags, worded for the terminal.
pub fn describe_missing(outcome: &TagsOutcome, registry: &str, repository: &str) -> String {
    match outcome {
        TagsOutcome::Status { status: 401, .. } => format!(
            "{} still refused access to '{}' after {} attempts (401 Unauthorized)",
            registry, repository, MAX_ATTEMPTS
        ),
        TagsOutcome::Status { status: 404, .. } => {
            format!("'{}' was not found on {} (404 Not Found)", repository, registry)
        }
        TagsOutcome::Status { status, .. } => format!(
            "{} answered HTTP {} for '{}'",
            registry, status, repository
        ),
        TagsOutcome::NoTags | TagsOutcome::Listed(_) => {
            format!("{} returned no tag list for '{}'", registry, repository)
        }
    }
}

/// Fetch the tags of `<repo>/<image>` using the context's configuration.
///
/// `Err` carries the outcome when the registry's reply has no tag list.
pub fn list_tags(
    ctx: &AppContext,
    image: &str,
    repo: &str,
    registry: &str,
) -> libtaglist::Result<Result<TagsOutput, TagsOutcome>> {
    let client = RegistryClient::from_config(&ctx.config)?;
    info!(
        registry,
        host = client.aliases().resolve(registry),
        repository = %repository_name(repo, image),
        "listing tags"
    );

    Ok(match client.tags(image, repo, registry)? {
        TagsOutcome::Listed(tags) => Ok(TagsOutput {
            registry: registry.to_string(),
            repository: repository_name(repo, image),
            tags,
        }),
        other => Err(other),
    })
}

/// Handle the tags command: print tags or exit with status 1
pub fn handle_tags(
    ctx: &AppContext,
    image: &str,
    repo: &str,
    registry: &str,
    output_format: OutputFormat,
) {
    let output = match list_tags(ctx, image, repo, registry) {
        Ok(Ok(output)) => output,
        Ok(Err(outcome)) => {
            format::warning(&describe_missing(
                &outcome,
                registry,
                &repository_name(repo, image),
            ));
            std::process::exit(1);
        }
        Err(e) => {
            format::error(&format::error_chain(&e));
            std::process::exit(1);
        }
    };

    match format::format_output(&output, output_format) {
        Ok(text) if text.is_empty() => {}
        Ok(text) => println!("{}", text),
        Err(e) => {
            format::error(&e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "tags_tests.rs"]
mod tests;
