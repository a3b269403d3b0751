use std::path::{Path, PathBuf};
use std::env;

pub const CONFIG_FILE: &str = ".sharetail.toml";

/// Load config file content from CWD first, then home directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    let home = env::var_os("HOME").map(PathBuf::from);
    load_from(Path::new("."), home.as_deref())
}

/// Search `cwd`, then `home`, for the config file
fn load_from(cwd: &Path, home: Option<&Path>) -> Option<String> {
    std::iter::once(cwd)
        .chain(home)
        .map(|dir| dir.join(CONFIG_FILE))
        .find_map(|path| match std::fs::read_to_string(&path) {
            Ok(content) => {
                log::debug!("Loaded config from {}", path.display());
                Some(content)
            }
            Err(_) => None,
        })
}
