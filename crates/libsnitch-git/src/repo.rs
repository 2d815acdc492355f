use std::path::{Path, PathBuf};

use git2::{Commit, ErrorCode, Repository};
use libsnitch_core::vcs::VersionControl;
use libsnitch_core::SnitchError;
use tracing::debug;

use crate::GitError;

/// Index mode of a submodule entry
const GITLINK_MODE: u32 = 0o160000;

/// A git working tree opened through libgit2
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open the repository containing `start`
    pub fn discover(start: &Path) -> Result<Self, GitError> {
        let repo = Repository::discover(start).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitError::NotARepo,
            _ => GitError::Git(e),
        })?;
        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }
        Ok(Self { repo })
    }

    fn workdir(&self) -> Result<PathBuf, GitError> {
        let workdir = self.repo.workdir().ok_or(GitError::BareRepo)?;
        Ok(std::fs::canonicalize(workdir)?)
    }

    /// `path` relative to the working tree root
    fn relative_to_workdir(&self, path: &Path) -> Result<PathBuf, GitError> {
        let workdir = self.workdir()?;
        let absolute = std::fs::canonicalize(path)?;
        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| GitError::OutsideWorkTree(path.display().to_string()))
    }

    /// Tracked files under `root`, like `git ls-files <root>`
    pub fn tracked_files(&self, root: &Path) -> Result<Vec<PathBuf>, GitError> {
        let prefix = self.relative_to_workdir(root)?;
        let index = self.repo.index()?;

        let mut files = Vec::new();
        for entry in index.iter() {
            if entry.mode == GITLINK_MODE {
                continue;
            }
            let entry_path = PathBuf::from(String::from_utf8_lossy(&entry.path).into_owned());
            if let Ok(under_root) = entry_path.strip_prefix(&prefix) {
                let file = if root == Path::new(".") {
                    under_root.to_path_buf()
                } else {
                    root.join(under_root)
                };
                // Conflicted paths have one entry per stage
                if files.last() != Some(&file) {
                    files.push(file);
                }
            }
        }

        debug!(root = %root.display(), count = files.len(), "listed tracked files");
        Ok(files)
    }

    /// Add the current contents of `path` to the index
    pub fn add_path(&self, path: &Path) -> Result<(), GitError> {
        let relative = self.relative_to_workdir(path)?;
        let mut index = self.repo.index()?;
        index.add_path(&relative)?;
        index.write()?;
        debug!(path = %relative.display(), "staged");
        Ok(())
    }

    /// Commit the index on top of HEAD, which may be unborn
    pub fn commit_index(&self, message: &str) -> Result<git2::Oid, GitError> {
        let mut index = self.repo.index()?;
        let tree_oid = index.write_tree()?;
        let tree = self.repo.find_tree(tree_oid)?;
        let sig = self.repo.signature()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                None
            }
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&Commit> = parent.iter().collect();

        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
        debug!(%oid, message, "created commit");
        Ok(oid)
    }
}

impl VersionControl for GitRepo {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, SnitchError> {
        Ok(self.tracked_files(root)?)
    }

    fn stage(&self, path: &Path) -> Result<(), SnitchError> {
        Ok(self.add_path(path)?)
    }

    fn commit(&self, message: &str) -> Result<(), SnitchError> {
        self.commit_index(message)?;
        Ok(())
    }
}
