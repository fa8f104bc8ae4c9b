use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};

/// Move `source` into `archive_dir` under the same file name, replacing any
/// earlier file of that name. Returns the new location.
pub fn archive(source: &Path, archive_dir: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .ok_or_else(|| eyre!("{} has no file name", source.display()))?;
    fs::create_dir_all(archive_dir)
        .wrap_err_with(|| format!("creating {}", archive_dir.display()))?;
    let target = archive_dir.join(name);

    match fs::rename(source, &target) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            fs::copy(source, &target).wrap_err_with(|| {
                format!("copying {} to {}", source.display(), target.display())
            })?;
            fs::remove_file(source)
                .wrap_err_with(|| format!("removing {}", source.display()))?;
        }
        Err(e) => {
            return Err(e).wrap_err_with(|| {
                format!("moving {} to {}", source.display(), target.display())
            });
        }
    }
    Ok(target)
}
