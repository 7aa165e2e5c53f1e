//! Files classified faxes into per-category folders.
//!
//! Output names are `fax_<YYYYmmdd_HHMMSS>.txt`. Two faxes routed to the same
//! folder within one second get the same name and the later copy overwrites
//! the earlier one.

use std::fs::{File, FileTimes};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use tokio::fs;
use tracing::debug;

use crate::error::RouterError;
use crate::pipeline::types::Category;

const OUTPUT_PREFIX: &str = "fax_";
const OUTPUT_EXTENSION: &str = "txt";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub struct FaxRouter {
    output_dir: PathBuf,
}

impl FaxRouter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Folder for a category under the output base.
    pub fn destination_dir(&self, category: Category) -> PathBuf {
        self.output_dir.join(category.folder())
    }

    /// Create every category folder, whether or not anything lands in it.
    pub async fn create_output_dirs(&self) -> Result<(), RouterError> {
        for category in Category::ALL {
            let path = self.destination_dir(category);
            fs::create_dir_all(&path)
                .await
                .map_err(|source| RouterError::OutputDir { path, source })?;
        }
        Ok(())
    }

    /// Copy `source` into the category folder under a timestamped name.
    pub async fn route(&self, category: Category, source: &Path) -> std::io::Result<PathBuf> {
        self.route_at(category, source, Local::now()).await
    }

    pub(crate) async fn route_at<Tz: TimeZone>(
        &self,
        category: Category,
        source: &Path,
        now: DateTime<Tz>,
    ) -> std::io::Result<PathBuf>
    where
        Tz::Offset: std::fmt::Display,
    {
        let dest_dir = self.destination_dir(category);
        fs::create_dir_all(&dest_dir).await?;

        let dest = dest_dir.join(output_filename(&now));
        // Copies permission bits along with the content.
        fs::copy(source, &dest).await?;

        let (from, to) = (source.to_path_buf(), dest.clone());
        tokio::task::spawn_blocking(move || copy_file_times(&from, &to))
            .await
            .map_err(std::io::Error::other)??;

        debug!(
            source = %source.display(),
            dest = %dest.display(),
            category = %category,
            "Copied fax"
        );
        Ok(dest)
    }
}

/// Carry the source's modification and access times over to `dest`.
/// Platforms that don't report a modification time are left alone.
fn copy_file_times(source: &Path, dest: &Path) -> std::io::Result<()> {
    let meta = std::fs::metadata(source)?;
    let Ok(modified) = meta.modified() else {
        return Ok(());
    };

    let mut times = FileTimes::new().set_modified(modified);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }

    File::options().write(true).open(dest)?.set_times(times)
}

/// `fax_<YYYYmmdd_HHMMSS>.txt` for the given instant.
pub fn output_filename<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{OUTPUT_PREFIX}{}.{OUTPUT_EXTENSION}", now.format(TIMESTAMP_FORMAT))
}
