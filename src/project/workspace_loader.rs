use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::file_loader::{self, LoadError};
use crate::model::RobotFileOutput;
use crate::parser::ParserConfig;

/// Parsed files of one directory tree, in path order.
#[derive(Debug, Default)]
pub struct Workspace {
    files: IndexMap<PathBuf, RobotFileOutput>,
    failures: Vec<(PathBuf, LoadError)>,
}

impl Workspace {
    pub fn files(&self) -> impl Iterator<Item = (&Path, &RobotFileOutput)> {
        self.files.iter().map(|(path, output)| (path.as_path(), output))
    }

    pub fn file(&self, path: &Path) -> Option<&RobotFileOutput> {
        self.files.get(path)
    }

    pub fn file_mut(&mut self, path: &Path) -> Option<&mut RobotFileOutput> {
        self.files.get_mut(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files that could not be read, with the reason
    pub fn failures(&self) -> &[(PathBuf, LoadError)] {
        &self.failures
    }
}

/// Loads workspace files with one parser configuration
pub struct WorkspaceLoader {
    config: ParserConfig,
}

impl WorkspaceLoader {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Load every robot file below `dir`.
    ///
    /// Files are parsed in parallel and kept in path order. A file that fails
    /// to load is recorded in [`Workspace::failures`]; only an unreadable
    /// directory fails the whole load.
    pub fn load_directory(&self, dir: &Path) -> Result<Workspace, LoadError> {
        let paths = file_loader::collect_file_paths(dir)?;
        let loaded: Vec<_> = paths
            .into_par_iter()
            .map(|path| {
                let result = file_loader::load_and_parse(&path, &self.config);
                (path, result)
            })
            .collect();

        let mut workspace = Workspace::default();
        for (path, result) in loaded {
            match result {
                Ok(output) => {
                    workspace.files.insert(path, output);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping file");
                    workspace.failures.push((path, e));
                }
            }
        }
        debug!(
            dir = %dir.display(),
            files = workspace.files.len(),
            failures = workspace.failures.len(),
            "loaded workspace"
        );
        Ok(workspace)
    }

    /// Load (or reload) a single file into `workspace`.
    pub fn load_file_into(&self, path: &Path, workspace: &mut Workspace) -> Result<(), LoadError> {
        let output = file_loader::load_and_parse(path, &self.config)?;
        workspace.files.insert(path.to_path_buf(), output);
        Ok(())
    }
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_directory_keeps_failures_apart() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.robot"), "*** Test Cases ***\nT\n    Log    x\n").unwrap();
        fs::write(root.join("b.robot"), [0xc3, 0x28]).unwrap();

        let workspace = WorkspaceLoader::default().load_directory(root).unwrap();
        assert_eq!(workspace.len(), 1);
        assert_eq!(workspace.failures().len(), 1);
        let output = workspace.file(&root.join("a.robot")).unwrap();
        assert_eq!(output.file().test_cases().holders().len(), 1);
    }

    #[test]
    fn test_reload_replaces_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("k.resource");
        fs::write(&path, "*** Keywords ***\nA\n    No Operation\n").unwrap();
        let loader = WorkspaceLoader::default();
        let mut workspace = loader.load_directory(temp_dir.path()).unwrap();

        fs::write(&path, "*** Keywords ***\nA\n    No Operation\nB\n    No Operation\n").unwrap();
        loader.load_file_into(&path, &mut workspace).unwrap();
        assert_eq!(workspace.len(), 1);
        assert_eq!(workspace.file(&path).unwrap().file().keywords().holders().len(), 2);
    }
}
