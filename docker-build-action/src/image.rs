use std::fmt;

use crate::context::CommitContext;

/// Registry that every image built by this action is tagged for.
pub const REGISTRY: &str = "ghcr.io";

/// Repositories following the organisation's naming convention carry this prefix, the image name
/// leaves it out.
pub const REPO_PREFIX: &str = "peachjar-";

const TAG_PREFIX: &str = "git-";

/// Returns `image_name` when it is non-empty, otherwise derives the name from the repository.
pub fn resolve_image_name<'a>(image_name: Option<&'a str>, repo_name: &'a str) -> &'a str {
    match image_name {
        Some(name) if !name.is_empty() => name,
        _ => repo_name.strip_prefix(REPO_PREFIX).unwrap_or(repo_name),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub registry: &'static str,
    pub owner: String,
    pub repo_name: String,
    pub name: String,
    pub tag: String,
}

impl ImageReference {
    pub fn resolve(context: &CommitContext, image_name: Option<&str>) -> Self {
        ImageReference {
            registry: REGISTRY,
            owner: context.owner.clone(),
            repo_name: context.repo_name.clone(),
            name: resolve_image_name(image_name, &context.repo_name).to_owned(),
            tag: format!("{TAG_PREFIX}{sha7}", sha7 = context.sha7()),
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{registry}/{owner}/{repo_name}/{name}:{tag}",
            registry = self.registry,
            owner = self.owner,
            repo_name = self.repo_name,
            name = self.name,
            tag = self.tag
        )
    }
}
