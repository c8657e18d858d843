use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const DEALS_FILE: &str = "deals.json";
const CONTACTS_FILE: &str = "contacts.json";

/// Directory holding the file-backed record store.
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Create the directory with empty record files.
    ///
    /// Fails if the directory already holds record files unless `force` is set,
    /// in which case the existing files are replaced.
    pub fn initialize(&self, force: bool) -> Result<()> {
        if self.deals_path().exists() && !force {
            bail!(
                "{} already contains pipeline data. Use --force to overwrite.",
                self.root.display()
            );
        }

        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create {}", self.root.display()))?;

        for path in [self.deals_path(), self.contacts_path()] {
            fs::write(&path, "[]\n")
                .with_context(|| format!("Failed to create {}", path.display()))?;
        }

        self.create_readme()?;

        Ok(())
    }

    /// Ensure the directory exists, creating missing record files.
    pub fn load(&self) -> Result<()> {
        if !self.root.exists() {
            bail!(
                "{} does not exist. Run 'dealboard init' first.",
                self.root.display()
            );
        }

        for path in [self.deals_path(), self.contacts_path()] {
            if !path.exists() {
                fs::write(&path, "[]\n")
                    .with_context(|| format!("Failed to create missing {}", path.display()))?;
            }
        }

        Ok(())
    }

    fn create_readme(&self) -> Result<()> {
        let readme_content = r#"# dealboard data directory

- `deals.json` - deal records (id, title, value, stage, probability, contactId, closeDate, notes)
- `contacts.json` - contact records referenced by deals

Files are rewritten under an advisory lock; edit them only while no
dealboard command is running.
"#;

        fs::write(self.root.join("README.md"), readme_content)
            .context("Failed to create README.md")?;

        Ok(())
    }

    pub fn deals_path(&self) -> PathBuf {
        self.root.join(DEALS_FILE)
    }

    pub fn contacts_path(&self) -> PathBuf {
        self.root.join(CONTACTS_FILE)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
