use std::fmt;

const SHA7_LEN: usize = 7;

/// The repository and revision that triggered the current workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitContext {
    pub owner: String,
    pub repo_name: String,
    pub sha: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ContextError {
    InvalidRepository(String),
    InvalidSha(String),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextError::InvalidRepository(value) => {
                write!(f, "expected the repository as `owner/name` but got {value:?}")
            }
            ContextError::InvalidSha(value) => write!(
                f,
                "expected a commit sha of at least {SHA7_LEN} hexadecimal characters but got {value:?}"
            ),
        }
    }
}

impl std::error::Error for ContextError {}

impl CommitContext {
    /// Builds the context from a repository slug such as `peachjar/peachjar-svc-auth` and the full
    /// commit sha.
    pub fn new(repository: &str, sha: &str) -> Result<Self, ContextError> {
        let (owner, repo_name) = repository
            .split_once('/')
            .filter(|(owner, repo_name)| {
                !owner.is_empty() && !repo_name.is_empty() && !repo_name.contains('/')
            })
            .ok_or_else(|| ContextError::InvalidRepository(repository.to_owned()))?;

        if sha.len() < SHA7_LEN || !sha.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ContextError::InvalidSha(sha.to_owned()));
        }

        Ok(Self {
            owner: owner.to_owned(),
            repo_name: repo_name.to_owned(),
            sha: sha.to_owned(),
        })
    }

    pub fn sha7(&self) -> &str {
        // The sha is validated to be ASCII so slicing on a byte index is safe.
        &self.sha[..SHA7_LEN]
    }
}
