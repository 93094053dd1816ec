//! Saving and loading network parameter sets.
//!
//! Paths ending in `.json` are written as pretty JSON; anything else uses the
//! compact bincode encoding.

use std::fs;
use std::path::Path;

use tracing::info;

use super::network::ParameterSet;
use crate::error::Result;

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn save(params: &ParameterSet, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let bytes = if is_json(path) {
        serde_json::to_vec_pretty(params)?
    } else {
        bincode::serde::encode_to_vec(params, bincode::config::standard())?
    };
    fs::write(path, bytes)?;
    info!(path = %path.display(), architecture = ?params.architecture, "saved model parameters");
    Ok(())
}

pub fn load(path: &Path) -> Result<ParameterSet> {
    let bytes = fs::read(path)?;
    let params: ParameterSet = if is_json(path) {
        serde_json::from_slice(&bytes)?
    } else {
        bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?.0
    };
    info!(path = %path.display(), architecture = ?params.architecture, "loaded model parameters");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SnakeError;
    use crate::nn::Network;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("neural_snake_{}_{}", std::process::id(), name))
    }

    #[test]
    fn json_and_binary_files_restore_parameters() {
        let net = Network::new(&[12, 8, 8, 4], &mut SmallRng::seed_from_u64(9));
        for name in ["model.json", "model.bin"] {
            let path = scratch(name);
            save(&net.parameters(), &path).unwrap();
            let loaded = load(&path).unwrap();
            assert_eq!(loaded, net.parameters());
            fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load(&scratch("does_not_exist.json")).unwrap_err();
        assert!(matches!(err, SnakeError::Io(_)));
    }
}
